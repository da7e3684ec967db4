use multisport_workouts::{
    Discipline, ValidationError, WorkoutError, WorkoutIndividualItem, WorkoutSegmentItem,
    convert_segment_discipline, flatten_segment_items, parse_segments, total_distance_meters,
    total_duration_seconds, total_segment_count, total_weight,
};

const TRIATHLON_BRICK: &str = r#"[
    {"type": "individual", "id": "s1", "name": "Swim", "discipline": "swim", "zone": 2,
     "target_distance_meters": 750, "stroke": "free"},
    {"type": "group", "id": "g1", "name": "Bike intervals", "repeatCount": 4, "segments": [
        {"type": "individual", "id": "b1", "name": "Hard", "discipline": "bike", "zone": 6,
         "target_duration_seconds": 240, "target_power_watts": 280},
        {"type": "individual", "id": "b2", "name": "Easy", "discipline": "bike", "zone": 2,
         "target_duration_seconds": 120, "rest_seconds": 0}
    ]},
    {"type": "individual", "id": "r1", "name": "Run off the bike", "discipline": "run", "zone": 3,
     "target_duration_seconds": 900, "target_distance_meters": 3000}
]"#;

#[test]
fn parses_and_aggregates_a_brick_session() {
    let segments = parse_segments(TRIATHLON_BRICK).expect("valid session");

    assert_eq!(segments.len(), 3);
    assert_eq!(total_segment_count(&segments), 1 + 2 * 4 + 1);
    assert_eq!(total_distance_meters(&segments), 3750.0);
    assert_eq!(total_duration_seconds(&segments), 360.0 * 4.0 + 900.0);
    // swim counts meters, bike and run count seconds
    assert_eq!(total_weight(&segments), 750.0 + 1440.0 + 900.0);

    let flat = flatten_segment_items(&segments);
    let ids: Vec<&str> = flat.iter().map(WorkoutIndividualItem::id).collect();
    assert_eq!(
        ids,
        ["s1", "b1", "b2", "b1", "b2", "b1", "b2", "b1", "b2", "r1"]
    );
}

#[test]
fn round_trips_through_json() {
    let segments = parse_segments(TRIATHLON_BRICK).expect("valid session");
    let json = serde_json::to_string(&segments).unwrap();
    let again = parse_segments(&json).expect("re-parse");
    assert_eq!(segments, again);
}

#[test]
fn rejects_zone_above_discipline_ceiling() {
    let json = r#"[{"type": "individual", "id": "x", "name": "Too hard", "discipline": "run", "zone": 6}]"#;
    match parse_segments(json) {
        Err(WorkoutError::Validation(ValidationError::ZoneOutOfRange {
            discipline, value, max, ..
        })) => {
            assert_eq!(discipline, Discipline::Run);
            assert_eq!(value, 6);
            assert_eq!(max, 5);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rejects_groups_nested_in_groups() {
    let json = r#"[{"type": "group", "id": "outer", "repeatCount": 2, "segments": [
        {"type": "group", "id": "inner", "repeatCount": 2, "segments": []}
    ]}]"#;
    assert!(matches!(
        parse_segments(json),
        Err(WorkoutError::Serialization(_))
    ));
}

#[test]
fn rejects_zero_repeat_count() {
    let json = r#"[{"type": "group", "id": "g", "repeatCount": 0, "segments": [
        {"type": "individual", "id": "a", "name": "A", "discipline": "bike", "zone": 1}
    ]}]"#;
    assert!(matches!(
        parse_segments(json),
        Err(WorkoutError::Validation(ValidationError::InvalidRepeatCount { repeat_count: 0, .. }))
    ));
}

#[test]
fn converting_bike_session_to_run_keeps_shape() {
    let segments = parse_segments(TRIATHLON_BRICK).expect("valid session");
    let err = convert_segment_discipline(&segments[1], Discipline::Run).unwrap_err();
    // zone 6 exists on the bike but not for run
    assert!(matches!(
        err,
        WorkoutError::Validation(ValidationError::ZoneOutOfRange { value: 6, max: 5, .. })
    ));

    let converted =
        convert_segment_discipline(&segments[2], Discipline::Swim).expect("run to swim");
    let WorkoutSegmentItem::Individual(WorkoutIndividualItem::Swim(swim)) = converted else {
        panic!("expected swim item");
    };
    assert_eq!(swim.base.id, "r1");
    assert_eq!(swim.target_distance_meters, Some(3000.0));
    assert_eq!(swim.stroke, None);
}
