//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use multisport_workouts::Discipline;
use multisport_workouts::garmin::GarminWorkoutSport;

/// Validate, summarise, convert and export structured multi-sport workouts.
///
/// Every command that takes an input reads a JSON array of workout segments.
#[derive(Debug, Parser)]
#[command(name = "multisport-workouts", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export a workout as a Garmin Connect structured workout.
    Export {
        /// Segment JSON file.
        input: PathBuf,

        /// Workout name shown on the device.
        #[arg(long, env = "MULTISPORT_WORKOUTS_NAME")]
        name: String,

        /// Garmin sport: running, cycling or lap_swimming.
        #[arg(long, env = "MULTISPORT_WORKOUTS_SPORT")]
        sport: GarminWorkoutSport,

        #[arg(long, env = "MULTISPORT_WORKOUTS_DESCRIPTION")]
        description: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print distance, duration, weight and step count totals.
    Summary {
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-target every segment to one discipline.
    Convert {
        input: PathBuf,

        /// Target discipline: swim, bike or run.
        #[arg(long)]
        discipline: Discipline,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the JSON Schema of the segment format.
    Schema {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}
