//! Segment tree to Garmin workout mapping.

use std::collections::HashSet;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{
    GarminStepDurationType, GarminStepIntensity, GarminStepTargetType, GarminSwimStrokeType,
    GarminWorkout, GarminWorkoutRegularStep, GarminWorkoutRepeatStep, GarminWorkoutRepeatType,
    GarminWorkoutSegment, GarminWorkoutSport, GarminWorkoutStep, MAX_WORKOUT_DESCRIPTION_LEN,
    check_len,
};
use crate::aggregate::{sum_segment, total_distance_meters};
use crate::model::{SwimStroke, WorkoutGroupItem, WorkoutIndividualItem, WorkoutSegmentItem};
use crate::{ValidationError, WorkoutError, WorkoutExporter};

/// Duration used for steps that carry neither a usable distance nor a duration.
pub const PLACEHOLDER_DURATION_SECS: f64 = 1.0;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarminExportOptions {
    pub workout_name: String,
    pub sport: GarminWorkoutSport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GarminExportOptions {
    pub fn new(workout_name: impl Into<String>, sport: GarminWorkoutSport) -> Self {
        Self {
            workout_name: workout_name.into(),
            sport,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_len(
            "description",
            self.description.as_deref(),
            MAX_WORKOUT_DESCRIPTION_LEN,
        )
    }
}

/// Hands out step orders 1, 2, 3, ... for a single export call.
#[derive(Debug)]
struct StepOrderCounter {
    next: u32,
}

impl StepOrderCounter {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn next_order(&mut self) -> u32 {
        let order = self.next;
        self.next += 1;
        order
    }
}

fn garmin_stroke(stroke: SwimStroke) -> GarminSwimStrokeType {
    match stroke {
        SwimStroke::Free => GarminSwimStrokeType::Freestyle,
        SwimStroke::Choice | SwimStroke::Kick => GarminSwimStrokeType::Choice,
        SwimStroke::Drill => GarminSwimStrokeType::Mixed,
    }
}

/// Distance only drives the step duration for swim; bike and run use time
/// even when a distance is present.
fn step_duration(item: &WorkoutIndividualItem) -> (GarminStepDurationType, f64) {
    if let WorkoutIndividualItem::Swim(swim) = item
        && let Some(distance) = swim.target_distance_meters.filter(|d| *d > 0.0)
    {
        return (GarminStepDurationType::Distance, distance);
    }
    match item.base().target_duration_seconds.filter(|d| *d > 0.0) {
        Some(duration) => (GarminStepDurationType::Time, duration),
        None => {
            tracing::debug!(
                item_id = item.id(),
                "step has no distance or duration, using placeholder duration"
            );
            (GarminStepDurationType::Time, PLACEHOLDER_DURATION_SECS)
        }
    }
}

fn map_individual_to_regular_step(
    item: &WorkoutIndividualItem,
    step_order: u32,
) -> GarminWorkoutRegularStep {
    let base = item.base();
    let (duration_type, duration_value) = step_duration(item);
    let intensity = if base.rest_seconds.is_some_and(|rest| rest > 0.0) {
        GarminStepIntensity::Recovery
    } else {
        GarminStepIntensity::Active
    };
    let zone_low = f64::from(base.zone);
    let zone_high = f64::from(base.to_zone.unwrap_or(base.zone));
    let stroke_type = match item {
        WorkoutIndividualItem::Swim(swim) => swim.stroke.map(garmin_stroke),
        WorkoutIndividualItem::Bike(_) | WorkoutIndividualItem::Run(_) => None,
    };

    GarminWorkoutRegularStep {
        step_order: Some(step_order),
        intensity: Some(intensity),
        description: Some(base.name.clone()),
        duration_type: Some(duration_type),
        duration_value: Some(duration_value),
        target_type: Some(GarminStepTargetType::PaceZone),
        target_value: Some(zone_high),
        target_value_low: Some(zone_low),
        target_value_high: Some(zone_high),
        stroke_type,
        ..Default::default()
    }
}

/// The repeat step takes the next order, then its children take the
/// following ones from the same counter.
fn map_group_to_repeat_step(
    group: &WorkoutGroupItem,
    counter: &mut StepOrderCounter,
) -> GarminWorkoutRepeatStep {
    let step_order = counter.next_order();
    let steps = group
        .segments
        .iter()
        .map(|item| map_individual_to_regular_step(item, counter.next_order()))
        .collect();

    GarminWorkoutRepeatStep {
        step_id: None,
        step_order: Some(step_order),
        intensity: Some(GarminStepIntensity::Interval),
        description: Some(
            group
                .name
                .clone()
                .unwrap_or_else(|| format!("Repeat x{}", group.repeat_count)),
        ),
        repeat_type: GarminWorkoutRepeatType::RepeatUntilStepsCmplt,
        repeat_value: group.repeat_count,
        skip_last_rest_step: None,
        steps,
    }
}

fn estimated_step_seconds(item: &WorkoutIndividualItem) -> f64 {
    let base = item.base();
    base.target_duration_seconds.unwrap_or(0.0) + base.rest_seconds.unwrap_or(0.0)
}

fn non_zero(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

fn build_garmin_segment(
    workout_segments: &[WorkoutSegmentItem],
    sport: GarminWorkoutSport,
) -> GarminWorkoutSegment {
    let mut counter = StepOrderCounter::new();
    let steps = workout_segments
        .iter()
        .map(|segment| match segment {
            WorkoutSegmentItem::Individual(item) => GarminWorkoutStep::Regular(
                map_individual_to_regular_step(item, counter.next_order()),
            ),
            WorkoutSegmentItem::Group(group) => {
                GarminWorkoutStep::Repeat(map_group_to_repeat_step(group, &mut counter))
            }
        })
        .collect();

    let estimated_duration: f64 = workout_segments
        .iter()
        .map(|segment| sum_segment(segment, estimated_step_seconds))
        .sum();
    // bike steps have no distance, so they never add to the estimate
    let estimated_distance = total_distance_meters(workout_segments);

    GarminWorkoutSegment {
        segment_order: None,
        sport,
        estimated_duration_in_secs: non_zero(estimated_duration),
        estimated_distance_in_meters: non_zero(estimated_distance),
        pool_length: None,
        pool_length_unit: None,
        steps,
    }
}

/// Reject workouts with a non-positive step duration or a step order used twice.
fn validate_garmin_workout(workout: &GarminWorkout) -> Result<(), WorkoutError> {
    workout.validate_schema()?;

    let steps = || workout.segments.iter().flat_map(|segment| &segment.steps);

    for step in steps() {
        for regular in step.regular_steps() {
            if !regular.duration_value.is_some_and(|value| value > 0.0) {
                return Err(WorkoutError::NonPositiveDuration {
                    description: regular.description.clone().unwrap_or_default(),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for step in steps() {
        let nested = match step {
            GarminWorkoutStep::Regular(_) => &[][..],
            GarminWorkoutStep::Repeat(repeat) => &repeat.steps[..],
        };
        let orders = step
            .step_order()
            .into_iter()
            .chain(nested.iter().filter_map(|s| s.step_order));
        for order in orders {
            if !seen.insert(order) {
                return Err(WorkoutError::DuplicateStepOrder(order));
            }
        }
    }

    Ok(())
}

/// Map a segment sequence to a single-segment Garmin workout.
///
/// The input tree is expected to be validated already; this only checks the
/// export options and the produced workout.
pub fn export_workout_to_garmin(
    workout_segments: &[WorkoutSegmentItem],
    options: &GarminExportOptions,
) -> Result<GarminWorkout, WorkoutError> {
    options.validate()?;
    let segment = build_garmin_segment(workout_segments, options.sport);

    let workout = GarminWorkout {
        workout_id: None,
        owner_id: None,
        workout_name: options.workout_name.clone(),
        description: options.description.clone(),
        updated_date: None,
        created_date: None,
        sport: options.sport,
        estimated_duration_in_secs: segment.estimated_duration_in_secs,
        estimated_distance_in_meters: segment.estimated_distance_in_meters,
        pool_length: None,
        pool_length_unit: None,
        workout_provider: None,
        workout_source_id: None,
        is_session_transition_enabled: None,
        segments: vec![segment],
    };

    if let Err(err) = validate_garmin_workout(&workout) {
        tracing::warn!(
            workout_name = %workout.workout_name,
            error = %err,
            "Garmin workout failed validation"
        );
        return Err(err);
    }

    tracing::debug!(
        workout_name = %workout.workout_name,
        sport = %workout.sport,
        steps = workout.segments[0].steps.len(),
        estimated_duration_in_secs = ?workout.estimated_duration_in_secs,
        estimated_distance_in_meters = ?workout.estimated_distance_in_meters,
        "exported Garmin workout"
    );
    Ok(workout)
}

/// [`WorkoutExporter`] producing Garmin workouts for fixed export options.
#[derive(Clone, Debug)]
pub struct GarminExporter {
    options: GarminExportOptions,
}

impl GarminExporter {
    pub fn new(options: GarminExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GarminExportOptions {
        &self.options
    }
}

#[async_trait]
impl WorkoutExporter for GarminExporter {
    type Output = GarminWorkout;

    async fn export(
        &self,
        workout_segments: &[WorkoutSegmentItem],
    ) -> Result<GarminWorkout, WorkoutError> {
        export_workout_to_garmin(workout_segments, &self.options)
    }
}
