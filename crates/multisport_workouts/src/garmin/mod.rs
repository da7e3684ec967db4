//! Garmin Connect structured workout export.

mod exporter;
pub mod types;

pub use exporter::{
    GarminExportOptions, GarminExporter, PLACEHOLDER_DURATION_SECS, export_workout_to_garmin,
};
pub use types::{
    GarminStepDurationType, GarminStepIntensity, GarminStepTargetType, GarminSwimStrokeType,
    GarminWorkout, GarminWorkoutRegularStep, GarminWorkoutRepeatStep, GarminWorkoutRepeatType,
    GarminWorkoutSegment, GarminWorkoutSport, GarminWorkoutStep,
};
