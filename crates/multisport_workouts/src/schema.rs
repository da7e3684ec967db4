//! JSON Schema for the segment model, for hosting applications that validate
//! workouts before they reach this crate.

use schemars::Schema;
use schemars::generate::SchemaSettings;
use schemars::transform::RecursiveTransform;

use crate::model::WorkoutSegmentItem;

/// JSON Schema describing an array of segments.
///
/// Discipline-specific zone ceilings are not expressible in the generated
/// schema; `validate()` remains the authority for those.
pub fn segment_json_schema() -> Schema {
    SchemaSettings::default()
        .with_transform(RecursiveTransform(drop_generated_id_default))
        .into_generator()
        .into_root_schema_for::<Vec<WorkoutSegmentItem>>()
}

/// A missing `id` is filled with a fresh random id, which is not a stable default.
fn drop_generated_id_default(schema: &mut Schema) {
    if let Some(id) = schema
        .get_mut("properties")
        .and_then(|properties| properties.get_mut("id"))
        .and_then(|id| id.as_object_mut())
    {
        id.remove("default");
    }
}
