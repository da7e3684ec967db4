//! Structured multi-sport workouts: segment model, validation, aggregation and
//! conversion to vendor workout formats.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub mod aggregate;
pub mod convert;
pub mod garmin;
pub mod id;
pub mod model;
pub mod schema;

pub use aggregate::{
    distance_meters, duration_seconds, flatten_segment_items, iter_segment_items,
    total_distance_meters, total_duration_seconds, total_segment_count, total_weight, weight,
};
pub use convert::{convert_individual_item, convert_segment_discipline};
pub use id::generate_item_id;
pub use model::{
    BikeWorkoutItem, Discipline, IndividualItemBase, RunWorkoutItem, SwimStroke, SwimWorkoutItem,
    WorkoutGroupItem, WorkoutIndividualItem, WorkoutSegmentItem, parse_segment, parse_segments,
};
pub use schema::segment_json_schema;

/// Schema constraint violated by a segment tree, export options or an exported workout.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} {value} is outside the {discipline} zone range 1-{max}")]
    ZoneOutOfRange {
        discipline: Discipline,
        field: &'static str,
        value: i32,
        max: i32,
    },
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidMeasure { field: &'static str, value: f64 },
    #[error("group '{id}' must contain at least one segment")]
    EmptyGroup { id: String },
    #[error("group '{id}' has repeatCount {repeat_count}, expected at least 1")]
    InvalidRepeatCount { id: String, repeat_count: u32 },
    #[error("{field} is {len} characters long, the limit is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("step '{description}' has a non-positive duration")]
    NonPositiveDuration { description: String },
    #[error("step order {0} is assigned more than once")]
    DuplicateStepOrder(u32),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error returned when parsing one of the crate's string enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Converts a segment sequence into a vendor-specific workout.
#[async_trait]
pub trait WorkoutExporter: Send + Sync {
    type Output: Send;

    async fn export(
        &self,
        workout_segments: &[WorkoutSegmentItem],
    ) -> Result<Self::Output, WorkoutError>;
}
