use super::*;

fn raw(min: u64, max: u64, a: i64, b: i64) -> RawDistanceRange {
    RawDistanceRange {
        min,
        max,
        a,
        b,
        flag: None,
    }
}

fn three_tier_table() -> DistanceRangeTable {
    DistanceRangeTable::new(vec![
        raw(0, 500, 0, 0),
        raw(500, 1000, 100, 0),
        raw(1000, 0, 0, 0),
    ])
    .expect("valid table")
}

// -----------------------------------------------------------------------
// validation
// -----------------------------------------------------------------------

#[test]
fn rejects_empty_ranges() {
    assert_eq!(
        DistanceRangeTable::new(vec![]),
        Err(ConfigurationError::EmptyRanges)
    );
}

#[test]
fn rejects_first_range_not_starting_at_zero() {
    let result = DistanceRangeTable::new(vec![raw(100, 200, 0, 0), raw(200, 0, 0, 0)]);
    assert_eq!(
        result,
        Err(ConfigurationError::FirstRangeNotZero { min: 100 })
    );
}

#[test]
fn rejects_last_range_with_upper_bound() {
    let result = DistanceRangeTable::new(vec![raw(0, 200, 0, 0), raw(200, 300, 0, 0)]);
    assert_eq!(
        result,
        Err(ConfigurationError::LastRangeNotOpenEnded { max: 300 })
    );
}

#[test]
fn rejects_unsorted_ranges() {
    let result = DistanceRangeTable::new(vec![raw(0, 200, 0, 0), raw(100, 0, 0, 0)]);
    assert!(
        matches!(
            result,
            Err(ConfigurationError::UnsortedRanges {
                index: 1,
                previous_min: 0,
                min: 100
            })
        ),
        "got: {result:?}"
    );
}

#[test]
fn rejects_duplicate_min_as_unsorted() {
    let result = DistanceRangeTable::new(vec![
        raw(0, 500, 0, 0),
        raw(500, 500, 0, 0),
        raw(500, 0, 0, 0),
    ]);
    assert!(matches!(
        result,
        Err(ConfigurationError::UnsortedRanges { index: 2, .. })
    ));
}

#[test]
fn rejects_gap_between_ranges() {
    let result = DistanceRangeTable::new(vec![raw(0, 200, 0, 0), raw(300, 0, 0, 0)]);
    assert_eq!(
        result,
        Err(ConfigurationError::RangeGap {
            index: 0,
            max: 200,
            next_min: 300
        })
    );
}

#[test]
fn rejects_overlap_between_ranges() {
    let result = DistanceRangeTable::new(vec![
        raw(0, 600, 0, 0),
        raw(500, 1000, 0, 0),
        raw(1000, 0, 0, 0),
    ]);
    assert!(matches!(
        result,
        Err(ConfigurationError::RangeGap { index: 0, .. })
    ));
}

#[test]
fn single_open_ended_range_is_valid_but_admits_nothing() {
    let table = DistanceRangeTable::new(vec![raw(0, 0, 0, 0)]).expect("valid");
    assert_eq!(table.len(), 1);
    assert_eq!(table.max_allowed_distance(), 0);
}

#[test]
fn accepts_valid_schedule() {
    let table = three_tier_table();
    assert_eq!(table.len(), 3);
    assert_eq!(table.max_allowed_distance(), 1000);
    assert!(table.ranges()[2].is_open_ended());
    assert_eq!(table.ranges()[1].max, Some(1000));
}

// -----------------------------------------------------------------------
// lookup
// -----------------------------------------------------------------------

#[test]
fn lookup_uses_half_open_intervals() {
    let table = three_tier_table();
    assert_eq!(table.lookup(0).unwrap().min, 0);
    assert_eq!(table.lookup(499).unwrap().min, 0);
    assert_eq!(table.lookup(500).unwrap().min, 500);
    assert_eq!(table.lookup(999).unwrap().min, 500);
}

#[test]
fn lookup_has_no_tier_past_the_service_area() {
    let table = three_tier_table();
    for distance in [1000, 1001, 5_000_000, u64::MAX] {
        assert_eq!(
            table.lookup(distance),
            Err(QuoteError::NoApplicableRange { distance })
        );
    }
}

#[test]
fn lookup_in_single_open_ended_table_finds_nothing() {
    let table = DistanceRangeTable::new(vec![raw(0, 0, 0, 0)]).expect("valid");
    assert_eq!(
        table.lookup(0),
        Err(QuoteError::NoApplicableRange { distance: 0 })
    );
}

#[test]
fn every_admissible_distance_maps_to_exactly_one_range() {
    let table = three_tier_table();
    for distance in 0..table.max_allowed_distance() {
        let matches = table
            .ranges()
            .iter()
            .filter(|r| r.contains(distance))
            .count();
        assert_eq!(matches, 1, "distance {distance} matched {matches} ranges");
    }
}

// -----------------------------------------------------------------------
// serde boundary
// -----------------------------------------------------------------------

#[test]
fn deserializing_validates_the_schedule() {
    let bad = r#"[{"min": 0, "max": 200, "a": 0, "b": 0}, {"min": 300, "max": 0, "a": 0, "b": 0}]"#;
    let err = serde_json::from_str::<DistanceRangeTable>(bad).unwrap_err();
    assert!(err.to_string().contains("range gap"), "got: {err}");
}

#[test]
fn serializing_restores_zero_sentinel_and_keeps_flag() {
    let json = r#"[
        {"min": 0, "max": 500, "a": 0, "b": 0, "flag": null},
        {"min": 500, "max": 0, "a": 100, "b": 1, "flag": "night"}
    ]"#;
    let table: DistanceRangeTable = serde_json::from_str(json).expect("valid");
    assert_eq!(table.ranges()[1].max, None);
    assert_eq!(
        table.ranges()[1].flag,
        Some(serde_json::Value::String("night".to_owned()))
    );

    let value = serde_json::to_value(&table).expect("serialize");
    assert_eq!(value[1]["max"], 0);
    assert_eq!(value[1]["flag"], "night");
    assert!(value[0].get("flag").is_none());
}
