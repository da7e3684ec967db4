//! Repeat-aware totals over segment sequences.
//!
//! Missing optional measures count as zero. A group contributes the sum over
//! its children multiplied by its repeat count.

use crate::model::{Discipline, WorkoutIndividualItem, WorkoutSegmentItem};

pub(crate) fn sum_segment(
    segment: &WorkoutSegmentItem,
    leaf: impl Fn(&WorkoutIndividualItem) -> f64,
) -> f64 {
    match segment {
        WorkoutSegmentItem::Individual(item) => leaf(item),
        WorkoutSegmentItem::Group(group) => {
            group.segments.iter().map(&leaf).sum::<f64>() * f64::from(group.repeat_count)
        }
    }
}

fn leaf_distance(item: &WorkoutIndividualItem) -> f64 {
    item.target_distance_meters().unwrap_or(0.0)
}

fn leaf_duration(item: &WorkoutIndividualItem) -> f64 {
    item.base().target_duration_seconds.unwrap_or(0.0)
}

fn leaf_weight(item: &WorkoutIndividualItem) -> f64 {
    match item.discipline() {
        Discipline::Swim => leaf_distance(item),
        Discipline::Bike | Discipline::Run => leaf_duration(item),
    }
}

/// Distance of one segment in meters.
pub fn distance_meters(segment: &WorkoutSegmentItem) -> f64 {
    sum_segment(segment, leaf_distance)
}

/// Duration of one segment in seconds.
pub fn duration_seconds(segment: &WorkoutSegmentItem) -> f64 {
    sum_segment(segment, leaf_duration)
}

/// Workload proxy: distance for swim steps, duration for bike and run steps.
///
/// Units differ per discipline (meters vs seconds), so weights are only
/// comparable between segments of the same discipline.
pub fn weight(segment: &WorkoutSegmentItem) -> f64 {
    sum_segment(segment, leaf_weight)
}

pub fn total_distance_meters(segments: &[WorkoutSegmentItem]) -> f64 {
    segments.iter().map(distance_meters).sum()
}

pub fn total_duration_seconds(segments: &[WorkoutSegmentItem]) -> f64 {
    segments.iter().map(duration_seconds).sum()
}

pub fn total_weight(segments: &[WorkoutSegmentItem]) -> f64 {
    segments.iter().map(weight).sum()
}

/// Number of individual steps executed, counting every repetition.
pub fn total_segment_count(segments: &[WorkoutSegmentItem]) -> usize {
    segments
        .iter()
        .map(|segment| match segment {
            WorkoutSegmentItem::Individual(_) => 1,
            WorkoutSegmentItem::Group(group) => group
                .segments
                .len()
                .saturating_mul(group.repeat_count as usize),
        })
        .fold(0, usize::saturating_add)
}

/// Steps in execution order, with each group's children repeated
/// `repeat_count` times. Nothing is buffered.
pub fn iter_segment_items(
    segments: &[WorkoutSegmentItem],
) -> impl Iterator<Item = &WorkoutIndividualItem> {
    segments.iter().flat_map(|segment| {
        let (items, times): (&[WorkoutIndividualItem], u32) = match segment {
            WorkoutSegmentItem::Individual(item) => (std::slice::from_ref(item), 1),
            WorkoutSegmentItem::Group(group) => (&group.segments, group.repeat_count),
        };
        (0..times).flat_map(move |_| items.iter())
    })
}

/// Expand groups into the literal sequence of steps they execute.
///
/// The result has `total_segment_count(segments)` items.
pub fn flatten_segment_items(segments: &[WorkoutSegmentItem]) -> Vec<WorkoutIndividualItem> {
    iter_segment_items(segments).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BikeWorkoutItem, RunWorkoutItem, SwimWorkoutItem, WorkoutGroupItem};

    fn swim(id: &str, distance: Option<f64>, duration: Option<f64>) -> WorkoutIndividualItem {
        let mut item = SwimWorkoutItem::new(id, 2);
        item.base.id = id.into();
        item.target_distance_meters = distance;
        item.base.target_duration_seconds = duration;
        item.into()
    }

    fn bike(id: &str, duration: Option<f64>) -> WorkoutIndividualItem {
        let mut item = BikeWorkoutItem::new(id, 4);
        item.base.id = id.into();
        item.base.target_duration_seconds = duration;
        item.into()
    }

    fn group(repeat_count: u32, segments: Vec<WorkoutIndividualItem>) -> WorkoutSegmentItem {
        WorkoutGroupItem::new(repeat_count, segments).into()
    }

    #[test]
    fn total_distance_counts_groups_and_ignores_missing() {
        let segments: Vec<WorkoutSegmentItem> = vec![
            swim("warmup", Some(400.0), None).into(),
            group(
                3,
                vec![swim("fast", Some(100.0), None), swim("easy", Some(50.0), None)],
            ),
            bike("tempo", Some(600.0)).into(),
        ];
        assert_eq!(total_distance_meters(&segments), 850.0);
    }

    #[test]
    fn total_duration_counts_groups_and_ignores_missing() {
        let segments: Vec<WorkoutSegmentItem> = vec![
            bike("warmup", Some(600.0)).into(),
            group(3, vec![bike("on", Some(300.0)), bike("off", Some(300.0))]),
            swim("cooldown", Some(200.0), None).into(),
        ];
        assert_eq!(total_duration_seconds(&segments), 2400.0);
    }

    #[test]
    fn segment_count_multiplies_group_children() {
        let segments: Vec<WorkoutSegmentItem> = vec![
            swim("warmup", None, None).into(),
            group(3, vec![swim("on", None, None), swim("off", None, None)]),
            swim("cooldown", None, None).into(),
        ];
        assert_eq!(total_segment_count(&segments), 8);
        assert_eq!(flatten_segment_items(&segments).len(), 8);
    }

    #[test]
    fn single_segment_helpers() {
        let g = group(2, vec![swim("a", Some(100.0), None), swim("b", Some(50.0), None)]);
        assert_eq!(distance_meters(&g), 300.0);

        let g = group(4, vec![bike("c", Some(60.0)), bike("d", Some(90.0))]);
        assert_eq!(duration_seconds(&g), 600.0);

        let lone: WorkoutSegmentItem = bike("e", None).into();
        assert_eq!(duration_seconds(&lone), 0.0);
        assert_eq!(distance_meters(&lone), 0.0);
    }

    #[test]
    fn weight_is_distance_for_swim_and_duration_otherwise() {
        let mut run = RunWorkoutItem::new("run", 3);
        run.base.target_duration_seconds = Some(120.0);
        run.target_distance_meters = Some(500.0);
        let run: WorkoutIndividualItem = run.into();

        assert_eq!(weight(&swim("s", Some(200.0), Some(300.0)).into()), 200.0);
        assert_eq!(weight(&run.clone().into()), 120.0);
        assert_eq!(weight(&group(3, vec![run, bike("b", Some(30.0))])), 450.0);
        assert_eq!(
            total_weight(&[swim("s", Some(200.0), None).into(), bike("b", Some(60.0)).into()]),
            260.0
        );
    }

    #[test]
    fn flatten_repeats_children_in_order() {
        let segments: Vec<WorkoutSegmentItem> = vec![
            swim("warmup", None, None).into(),
            group(2, vec![swim("on", None, None), swim("off", None, None)]),
        ];
        let ids: Vec<String> = flatten_segment_items(&segments)
            .iter()
            .map(|item| item.id().to_string())
            .collect();
        assert_eq!(ids, ["warmup", "on", "off", "on", "off"]);
    }

    #[test]
    fn huge_repeat_counts_do_not_allocate_up_front() {
        let segments: Vec<WorkoutSegmentItem> = vec![
            group(u32::MAX, vec![swim("on", None, None), swim("off", None, None)]),
            swim("never", None, None).into(),
        ];
        assert_eq!(
            total_segment_count(&segments),
            2usize.saturating_mul(u32::MAX as usize).saturating_add(1)
        );
        let ids: Vec<&str> = iter_segment_items(&segments)
            .take(3)
            .map(WorkoutIndividualItem::id)
            .collect();
        assert_eq!(ids, ["on", "off", "on"]);
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        assert_eq!(total_distance_meters(&[]), 0.0);
        assert_eq!(total_duration_seconds(&[]), 0.0);
        assert_eq!(total_segment_count(&[]), 0);
        assert!(flatten_segment_items(&[]).is_empty());
    }
}
