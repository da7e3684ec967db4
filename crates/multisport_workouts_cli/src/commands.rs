//! Subcommand implementations. File I/O happens here; the library stays pure.

use std::io::Write;
use std::path::Path;

use multisport_workouts::garmin::{GarminExportOptions, GarminExporter};
use multisport_workouts::{
    Discipline, WorkoutExporter, WorkoutSegmentItem, convert_segment_discipline, parse_segments,
    segment_json_schema, total_distance_meters, total_duration_seconds, total_segment_count,
    total_weight,
};
use serde::{Deserialize, Serialize};

use crate::cli::OutputArgs;
use crate::error::CliResult;

/// Repeat-aware totals for a segment sequence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub total_weight: f64,
    pub total_segment_count: usize,
}

impl WorkoutSummary {
    pub fn of(segments: &[WorkoutSegmentItem]) -> Self {
        Self {
            total_distance_meters: total_distance_meters(segments),
            total_duration_seconds: total_duration_seconds(segments),
            total_weight: total_weight(segments),
            total_segment_count: total_segment_count(segments),
        }
    }
}

/// Read and validate a segment file.
pub fn read_segments(path: &Path) -> CliResult<Vec<WorkoutSegmentItem>> {
    let json = std::fs::read_to_string(path)?;
    let segments = parse_segments(&json)?;
    tracing::debug!(path = %path.display(), segments = segments.len(), "loaded segments");
    Ok(segments)
}

/// Serialise `value` to the file named in `output`, or to `stdout` when none is given.
pub fn write_json<T, W>(value: &T, output: &OutputArgs, stdout: &mut W) -> CliResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let mut rendered = if output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    rendered.push('\n');

    match &output.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => stdout.write_all(rendered.as_bytes())?,
    }
    Ok(())
}

pub async fn export<W: Write>(
    input: &Path,
    options: GarminExportOptions,
    output: &OutputArgs,
    stdout: &mut W,
) -> CliResult<()> {
    let segments = read_segments(input)?;
    let exporter = GarminExporter::new(options);
    let workout = exporter.export(&segments).await?;
    tracing::info!(
        workout_name = %workout.workout_name,
        sport = %workout.sport,
        "exported Garmin workout"
    );
    write_json(&workout, output, stdout)
}

pub fn summary<W: Write>(input: &Path, output: &OutputArgs, stdout: &mut W) -> CliResult<()> {
    let segments = read_segments(input)?;
    write_json(&WorkoutSummary::of(&segments), output, stdout)
}

pub fn convert<W: Write>(
    input: &Path,
    discipline: Discipline,
    output: &OutputArgs,
    stdout: &mut W,
) -> CliResult<()> {
    let segments = read_segments(input)?;
    let converted = segments
        .iter()
        .map(|segment| convert_segment_discipline(segment, discipline))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(%discipline, segments = converted.len(), "converted segments");
    write_json(&converted, output, stdout)
}

pub fn schema<W: Write>(output: &OutputArgs, stdout: &mut W) -> CliResult<()> {
    write_json(&segment_json_schema(), output, stdout)
}
