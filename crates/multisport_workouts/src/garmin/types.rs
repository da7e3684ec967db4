//! Garmin structured workout wire format.
//!
//! Field names follow the Garmin Training API. Server-assigned fields (ids,
//! dates) are optional and left unset when creating a workout.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{UnknownVariant, ValidationError};

pub const MAX_WORKOUT_DESCRIPTION_LEN: usize = 1024;
pub const MAX_STEP_DESCRIPTION_LEN: usize = 512;
pub const MAX_WORKOUT_PROVIDER_LEN: usize = 20;
pub const MAX_WORKOUT_SOURCE_ID_LEN: usize = 20;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminWorkoutSport {
    Running,
    Cycling,
    LapSwimming,
}

impl GarminWorkoutSport {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Cycling => "CYCLING",
            Self::LapSwimming => "LAP_SWIMMING",
        }
    }
}

impl fmt::Display for GarminWorkoutSport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarminWorkoutSport {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "RUNNING" => Ok(Self::Running),
            "CYCLING" => Ok(Self::Cycling),
            "LAP_SWIMMING" => Ok(Self::LapSwimming),
            _ => Err(UnknownVariant::new("Garmin sport", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminPoolLengthUnit {
    Yard,
    Meter,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminWorkoutRepeatType {
    RepeatUntilStepsCmplt,
    RepeatUntilTime,
    RepeatUntilDistance,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminStepIntensity {
    Rest,
    Warmup,
    Cooldown,
    Recovery,
    Active,
    Interval,
    /// Swim only.
    Main,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminStepDurationType {
    Time,
    Distance,
    HrLessThan,
    HrGreaterThan,
    Calories,
    Open,
    PowerLessThan,
    PowerGreaterThan,
    TimeAtValidCda,
    FixedRest,
    Reps,
    FixedRepetition,
    RepetitionSwimCssOffset,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminStepTargetType {
    Speed,
    HeartRate,
    Cadence,
    Power,
    Grade,
    Resistance,
    #[serde(rename = "POWER_3S")]
    Power3s,
    #[serde(rename = "POWER_10S")]
    Power10s,
    #[serde(rename = "POWER_30S")]
    Power30s,
    PowerLap,
    SpeedLap,
    HeartRateLap,
    Pace,
    Open,
    SwimInstruction,
    SwimCssOffset,
    PaceZone,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminSwimStrokeType {
    Backstroke,
    Breaststroke,
    Butterfly,
    Freestyle,
    Mixed,
    Im,
    Rimo,
    Choice,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminSwimDrillType {
    Kick,
    Pull,
    Butterfly,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminSwimEquipmentType {
    None,
    SwimFins,
    SwimKickboard,
    SwimPaddles,
    SwimPullBuoy,
    SwimSnorkel,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarminWeightDisplayUnit {
    Kilogram,
    Pound,
}

/// A leaf step (`"type": "WorkoutStep"`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkoutRegularStep {
    /// Assigned by Garmin; ignored on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<GarminStepIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_type: Option<GarminStepDurationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_value: Option<f64>,
    /// e.g. `"PERCENT"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<GarminStepTargetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_target_type: Option<GarminStepTargetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_target_value_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_target_value_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_target_value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_type: Option<GarminSwimStrokeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drill_type: Option<GarminSwimDrillType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<GarminSwimEquipmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_display_unit: Option<GarminWeightDisplayUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_last_rest_step: Option<bool>,
}

/// A block of regular steps repeated `repeat_value` times
/// (`"type": "WorkoutRepeatStep"`). Repeat steps do not nest.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkoutRepeatStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<GarminStepIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub repeat_type: GarminWorkoutRepeatType,
    pub repeat_value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_last_rest_step: Option<bool>,
    #[serde(with = "regular_steps")]
    #[schemars(with = "Vec<GarminWorkoutRegularStep>")]
    pub steps: Vec<GarminWorkoutRegularStep>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum GarminWorkoutStep {
    #[serde(rename = "WorkoutStep")]
    Regular(GarminWorkoutRegularStep),
    #[serde(rename = "WorkoutRepeatStep")]
    Repeat(GarminWorkoutRepeatStep),
}

impl GarminWorkoutStep {
    pub fn step_order(&self) -> Option<u32> {
        match self {
            Self::Regular(step) => step.step_order,
            Self::Repeat(step) => step.step_order,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Regular(step) => step.description.as_deref(),
            Self::Repeat(step) => step.description.as_deref(),
        }
    }

    /// Regular steps in execution order: the step itself, or a repeat's children.
    pub fn regular_steps(&self) -> &[GarminWorkoutRegularStep] {
        match self {
            Self::Regular(step) => std::slice::from_ref(step),
            Self::Repeat(step) => &step.steps,
        }
    }
}

/// The steps for one sport within a workout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkoutSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_order: Option<u32>,
    pub sport: GarminWorkoutSport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_in_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_distance_in_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_length_unit: Option<GarminPoolLengthUnit>,
    pub steps: Vec<GarminWorkoutStep>,
}

/// A workout as accepted by Garmin's workout-creation endpoint.
///
/// Garmin expects one segment per sport.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    pub workout_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 8601, set by Garmin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    /// ISO 8601, set by Garmin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    pub sport: GarminWorkoutSport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_in_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_distance_in_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_length_unit: Option<GarminPoolLengthUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_session_transition_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<GarminWorkoutSegment>,
}

impl GarminWorkout {
    /// Check the length limits Garmin enforces on workout and step text.
    pub fn validate_schema(&self) -> Result<(), ValidationError> {
        check_len(
            "description",
            self.description.as_deref(),
            MAX_WORKOUT_DESCRIPTION_LEN,
        )?;
        check_len(
            "workoutProvider",
            self.workout_provider.as_deref(),
            MAX_WORKOUT_PROVIDER_LEN,
        )?;
        check_len(
            "workoutSourceId",
            self.workout_source_id.as_deref(),
            MAX_WORKOUT_SOURCE_ID_LEN,
        )?;
        for step in self.segments.iter().flat_map(|segment| &segment.steps) {
            check_len(
                "step description",
                step.description(),
                MAX_STEP_DESCRIPTION_LEN,
            )?;
            if let GarminWorkoutStep::Repeat(repeat) = step {
                for nested in &repeat.steps {
                    check_len(
                        "step description",
                        nested.description.as_deref(),
                        MAX_STEP_DESCRIPTION_LEN,
                    )?;
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn check_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value.map(|s| s.chars().count()) {
        Some(len) if len > max => Err(ValidationError::TooLong { field, len, max }),
        _ => Ok(()),
    }
}

/// Steps nested in a repeat carry `"type": "WorkoutStep"` like top-level ones.
mod regular_steps {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::GarminWorkoutRegularStep;

    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum TaggedRef<'a> {
        #[serde(rename = "WorkoutStep")]
        Regular(&'a GarminWorkoutRegularStep),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Tagged {
        #[serde(rename = "WorkoutStep")]
        Regular(GarminWorkoutRegularStep),
    }

    pub fn serialize<S>(steps: &[GarminWorkoutRegularStep], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(steps.iter().map(TaggedRef::Regular))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<GarminWorkoutRegularStep>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let steps = Vec::<Tagged>::deserialize(deserializer)?;
        Ok(steps
            .into_iter()
            .map(|Tagged::Regular(step)| step)
            .collect())
    }
}
