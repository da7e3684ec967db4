//! Re-targeting segments to another discipline.

use crate::WorkoutError;
use crate::model::{
    BikeWorkoutItem, Discipline, RunWorkoutItem, SwimWorkoutItem, WorkoutIndividualItem,
    WorkoutSegmentItem,
};

/// Convert an individual step to `discipline`.
///
/// Shared fields (id, name, duration, zones, rest) carry over unchanged. Fields
/// specific to the source discipline are kept only when the target has the same
/// field; distance never carries over from bike. The result is validated against
/// the target discipline, so a bike step in zone 7 cannot become a swim step.
pub fn convert_individual_item(
    item: &WorkoutIndividualItem,
    discipline: Discipline,
) -> Result<WorkoutIndividualItem, WorkoutError> {
    let base = item.base().clone();
    let converted = match discipline {
        Discipline::Swim => WorkoutIndividualItem::Swim(SwimWorkoutItem {
            base,
            target_distance_meters: item.target_distance_meters(),
            stroke: match item {
                WorkoutIndividualItem::Swim(swim) => swim.stroke,
                _ => None,
            },
        }),
        Discipline::Bike => {
            let (target_power_watts, target_cadence_rpm) = match item {
                WorkoutIndividualItem::Bike(bike) => {
                    (bike.target_power_watts, bike.target_cadence_rpm)
                }
                _ => (None, None),
            };
            WorkoutIndividualItem::Bike(BikeWorkoutItem {
                base,
                target_power_watts,
                target_cadence_rpm,
            })
        }
        Discipline::Run => WorkoutIndividualItem::Run(RunWorkoutItem {
            base,
            target_distance_meters: item.target_distance_meters(),
            target_pace_seconds_per_km: match item {
                WorkoutIndividualItem::Run(run) => run.target_pace_seconds_per_km,
                _ => None,
            },
        }),
    };
    converted.validate()?;
    Ok(converted)
}

/// Convert a segment to `discipline`; a group converts each child and keeps
/// its own id, name and repeat count.
pub fn convert_segment_discipline(
    segment: &WorkoutSegmentItem,
    discipline: Discipline,
) -> Result<WorkoutSegmentItem, WorkoutError> {
    match segment {
        WorkoutSegmentItem::Individual(item) => {
            convert_individual_item(item, discipline).map(WorkoutSegmentItem::Individual)
        }
        WorkoutSegmentItem::Group(group) => {
            let segments = group
                .segments
                .iter()
                .map(|item| convert_individual_item(item, discipline))
                .collect::<Result<Vec<_>, _>>()?;
            let mut converted = group.clone();
            converted.segments = segments;
            Ok(WorkoutSegmentItem::Group(converted))
        }
    }
}
