//! Segment data model: individual steps per discipline and repeat groups.
//!
//! Values are plain data. Deserialising does not enforce the zone and measure
//! bounds; call `validate()` (or use [`parse_segments`]) at the boundary where
//! a tree enters the system.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::id::generate_item_id;
use crate::{UnknownVariant, ValidationError, WorkoutError};

/// Lowest zone for every discipline.
pub const MIN_ZONE: i32 = 1;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Swim,
    Bike,
    Run,
}

impl Discipline {
    /// Highest zone accepted for `zone` and `toZone`.
    pub fn max_zone(self) -> i32 {
        match self {
            Self::Swim => 4,
            Self::Bike => 7,
            Self::Run => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Swim => "swim",
            Self::Bike => "bike",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "swim" => Ok(Self::Swim),
            "bike" => Ok(Self::Bike),
            "run" => Ok(Self::Run),
            _ => Err(UnknownVariant::new("discipline", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SwimStroke {
    Free,
    Kick,
    Drill,
    Choice,
}

impl FromStr for SwimStroke {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "kick" => Ok(Self::Kick),
            "drill" => Ok(Self::Drill),
            "choice" => Ok(Self::Choice),
            _ => Err(UnknownVariant::new("swim stroke", s)),
        }
    }
}

/// Fields shared by every individual step regardless of discipline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct IndividualItemBase {
    #[serde(default = "generate_item_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_duration_seconds: Option<f64>,
    #[serde(deserialize_with = "zone_number::deserialize")]
    #[schemars(with = "i32", range(min = 1))]
    pub zone: i32,
    /// Upper bound of a zone range; absent when the step targets one zone.
    #[serde(
        rename = "toZone",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "zone_number::deserialize_option"
    )]
    #[schemars(with = "Option<i32>", range(min = 1))]
    pub to_zone: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<f64>,
}

impl IndividualItemBase {
    pub fn new(name: impl Into<String>, zone: i32) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            target_duration_seconds: None,
            zone,
            to_zone: None,
            rest_seconds: None,
        }
    }

    fn validate(&self, discipline: Discipline) -> Result<(), ValidationError> {
        check_zone(discipline, "zone", self.zone)?;
        if let Some(to_zone) = self.to_zone {
            check_zone(discipline, "toZone", to_zone)?;
        }
        check_measure("target_duration_seconds", self.target_duration_seconds)?;
        check_measure("rest_seconds", self.rest_seconds)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SwimWorkoutItem {
    #[serde(flatten)]
    pub base: IndividualItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_distance_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<SwimStroke>,
}

impl SwimWorkoutItem {
    pub fn new(name: impl Into<String>, zone: i32) -> Self {
        Self {
            base: IndividualItemBase::new(name, zone),
            target_distance_meters: None,
            stroke: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct BikeWorkoutItem {
    #[serde(flatten)]
    pub base: IndividualItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_power_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cadence_rpm: Option<f64>,
}

impl BikeWorkoutItem {
    pub fn new(name: impl Into<String>, zone: i32) -> Self {
        Self {
            base: IndividualItemBase::new(name, zone),
            target_power_watts: None,
            target_cadence_rpm: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct RunWorkoutItem {
    #[serde(flatten)]
    pub base: IndividualItemBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_distance_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pace_seconds_per_km: Option<f64>,
}

impl RunWorkoutItem {
    pub fn new(name: impl Into<String>, zone: i32) -> Self {
        Self {
            base: IndividualItemBase::new(name, zone),
            target_distance_meters: None,
            target_pace_seconds_per_km: None,
        }
    }
}

/// A single exercise step, discriminated by `discipline`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "discipline", rename_all = "lowercase")]
pub enum WorkoutIndividualItem {
    Swim(SwimWorkoutItem),
    Bike(BikeWorkoutItem),
    Run(RunWorkoutItem),
}

impl WorkoutIndividualItem {
    pub fn discipline(&self) -> Discipline {
        match self {
            Self::Swim(_) => Discipline::Swim,
            Self::Bike(_) => Discipline::Bike,
            Self::Run(_) => Discipline::Run,
        }
    }

    pub fn base(&self) -> &IndividualItemBase {
        match self {
            Self::Swim(item) => &item.base,
            Self::Bike(item) => &item.base,
            Self::Run(item) => &item.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Distance target; always `None` for bike steps, which have no distance field.
    pub fn target_distance_meters(&self) -> Option<f64> {
        match self {
            Self::Swim(item) => item.target_distance_meters,
            Self::Run(item) => item.target_distance_meters,
            Self::Bike(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.base().validate(self.discipline())?;
        match self {
            Self::Swim(item) => check_measure("target_distance_meters", item.target_distance_meters),
            Self::Bike(item) => {
                check_measure("target_power_watts", item.target_power_watts)?;
                check_measure("target_cadence_rpm", item.target_cadence_rpm)
            }
            Self::Run(item) => {
                check_measure("target_distance_meters", item.target_distance_meters)?;
                check_measure(
                    "target_pace_seconds_per_km",
                    item.target_pace_seconds_per_km,
                )
            }
        }
    }
}

impl From<SwimWorkoutItem> for WorkoutIndividualItem {
    fn from(item: SwimWorkoutItem) -> Self {
        Self::Swim(item)
    }
}

impl From<BikeWorkoutItem> for WorkoutIndividualItem {
    fn from(item: BikeWorkoutItem) -> Self {
        Self::Bike(item)
    }
}

impl From<RunWorkoutItem> for WorkoutIndividualItem {
    fn from(item: RunWorkoutItem) -> Self {
        Self::Run(item)
    }
}

fn default_repeat_count() -> u32 {
    1
}

/// A block of individual steps executed `repeat_count` times in order.
///
/// Groups never contain other groups.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct WorkoutGroupItem {
    #[serde(default = "generate_item_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "repeatCount", default = "default_repeat_count")]
    #[schemars(range(min = 1))]
    pub repeat_count: u32,
    #[serde(with = "individual_segments")]
    #[schemars(with = "Vec<individual_segments::GroupChildItem>")]
    #[schemars(length(min = 1))]
    pub segments: Vec<WorkoutIndividualItem>,
}

impl WorkoutGroupItem {
    pub fn new(repeat_count: u32, segments: Vec<WorkoutIndividualItem>) -> Self {
        Self {
            id: generate_item_id(),
            name: None,
            repeat_count,
            segments,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.repeat_count < 1 {
            return Err(ValidationError::InvalidRepeatCount {
                id: self.id.clone(),
                repeat_count: self.repeat_count,
            });
        }
        if self.segments.is_empty() {
            return Err(ValidationError::EmptyGroup {
                id: self.id.clone(),
            });
        }
        self.segments.iter().try_for_each(WorkoutIndividualItem::validate)
    }
}

/// Either an individual step or a repeat group, discriminated by `type`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutSegmentItem {
    Individual(WorkoutIndividualItem),
    Group(WorkoutGroupItem),
}

impl WorkoutSegmentItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Individual(item) => item.id(),
            Self::Group(group) => &group.id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Individual(item) => item.validate(),
            Self::Group(group) => group.validate(),
        }
    }
}

impl From<WorkoutIndividualItem> for WorkoutSegmentItem {
    fn from(item: WorkoutIndividualItem) -> Self {
        Self::Individual(item)
    }
}

impl From<WorkoutGroupItem> for WorkoutSegmentItem {
    fn from(group: WorkoutGroupItem) -> Self {
        Self::Group(group)
    }
}

/// Deserialise a JSON array of segments and validate every item.
pub fn parse_segments(json: &str) -> Result<Vec<WorkoutSegmentItem>, WorkoutError> {
    let segments: Vec<WorkoutSegmentItem> = serde_json::from_str(json)?;
    for segment in &segments {
        segment.validate()?;
    }
    Ok(segments)
}

/// Deserialise and validate a single segment.
pub fn parse_segment(json: &str) -> Result<WorkoutSegmentItem, WorkoutError> {
    let segment: WorkoutSegmentItem = serde_json::from_str(json)?;
    segment.validate()?;
    Ok(segment)
}

fn check_zone(discipline: Discipline, field: &'static str, value: i32) -> Result<(), ValidationError> {
    let max = discipline.max_zone();
    if (MIN_ZONE..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ZoneOutOfRange {
            discipline,
            field,
            value,
            max,
        })
    }
}

fn check_measure(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(v.is_finite() && v >= 0.0) => {
            Err(ValidationError::InvalidMeasure { field, value: v })
        }
        _ => Ok(()),
    }
}

/// Zones arrive as JSON numbers; whole floats such as `2.0` are accepted and
/// magnitudes beyond `i32` saturate so the range check still reports them.
mod zone_number {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};

    struct Zone(i32);

    struct ZoneVisitor;

    impl Visitor<'_> for ZoneVisitor {
        type Value = Zone;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole-number zone")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Zone, E> {
            Ok(Zone(v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Zone, E> {
            Ok(Zone(i32::try_from(v).unwrap_or(i32::MAX)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Zone, E> {
            if v.is_finite() && v.fract() == 0.0 {
                // float to int casts saturate
                Ok(Zone(v as i32))
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    impl<'de> Deserialize<'de> for Zone {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ZoneVisitor)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        Zone::deserialize(deserializer).map(|Zone(zone)| zone)
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i32>, D::Error> {
        Ok(Option::<Zone>::deserialize(deserializer)?.map(|Zone(zone)| zone))
    }
}

/// Group children carry `"type": "individual"` on the wire like top-level items.
mod individual_segments {
    use schemars::JsonSchema;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::WorkoutIndividualItem;

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum TaggedRef<'a> {
        Individual(&'a WorkoutIndividualItem),
    }

    #[derive(Deserialize, JsonSchema)]
    #[serde(tag = "type", rename_all = "lowercase")]
    pub(super) enum GroupChildItem {
        Individual(WorkoutIndividualItem),
    }

    pub fn serialize<S>(items: &[WorkoutIndividualItem], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(items.iter().map(TaggedRef::Individual))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<WorkoutIndividualItem>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<GroupChildItem>::deserialize(deserializer)?;
        Ok(items
            .into_iter()
            .map(|GroupChildItem::Individual(item)| item)
            .collect())
    }
}
