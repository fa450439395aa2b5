//! Tests for batch expansion.

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::{expand_plan, repeat_allowed, BatchPlan, Shift, TimeOfDay};

fn shift(start: &str, end: &str) -> Shift {
    Shift::new(
        TimeOfDay::parse(start).unwrap(),
        TimeOfDay::parse(end).unwrap(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base_plan() -> BatchPlan {
    BatchPlan {
        dates: vec![date(2025, 6, 2), date(2025, 6, 4)],
        shifts: vec![shift("08:00", "11:00")], // 6 slots at 30 minutes
        slot_duration_minutes: 30,
        price: None,
        repeat_weeks: 1,
    }
}

#[test]
fn cross_product_count() {
    // 2 dates × 1 shift × 6 slots × 2 weeks (week 0 and week 1).
    let requests = expand_plan(&base_plan());
    assert_eq!(requests.len(), 24);
}

#[test]
fn output_is_week_major() {
    let requests = expand_plan(&base_plan());

    // Indices 0..12 belong to week 0, 12..24 to week 1; the 13th request
    // (index 12) is the first of week 1: the first date shifted by 7 days.
    assert_eq!(
        requests[12].start_time,
        Utc.with_ymd_and_hms(2025, 6, 9, 8, 0, 0).unwrap()
    );
    assert_eq!(
        requests[0].start_time,
        Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap()
    );
    // Within week 0, the second date's slots start at index 6.
    assert_eq!(
        requests[6].start_time,
        Utc.with_ymd_and_hms(2025, 6, 4, 8, 0, 0).unwrap()
    );
}

#[test]
fn shifts_expand_in_submission_order() {
    let plan = BatchPlan {
        dates: vec![date(2025, 6, 2)],
        shifts: vec![shift("14:00", "15:00"), shift("08:00", "09:00")],
        slot_duration_minutes: 30,
        price: None,
        repeat_weeks: 0,
    };

    let requests = expand_plan(&plan);

    assert_eq!(requests.len(), 4);
    // The later shift was submitted first, so its slots come first.
    assert_eq!(
        requests[0].start_time,
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap()
    );
    assert_eq!(
        requests[2].start_time,
        Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap()
    );
}

#[test]
fn price_and_duration_propagate_to_every_request() {
    let mut plan = base_plan();
    plan.price = Some(150_000.0);

    for request in expand_plan(&plan) {
        assert_eq!(request.price, Some(150_000.0));
        assert_eq!(request.slot_duration_in_minutes, 30);
    }
}

#[test]
fn zero_repeat_weeks_expands_once() {
    let mut plan = base_plan();
    plan.repeat_weeks = 0;
    assert_eq!(expand_plan(&plan).len(), 12);
}

#[test]
fn expansion_is_idempotent() {
    let plan = base_plan();
    let first = expand_plan(&plan);
    let second = expand_plan(&plan);
    assert_eq!(first, second, "identical input must produce an identical list");
}

#[test]
fn repeat_allowed_requires_span_under_seven_days() {
    assert!(repeat_allowed(&[]));
    assert!(repeat_allowed(&[date(2025, 6, 2)]));
    assert!(repeat_allowed(&[date(2025, 6, 2), date(2025, 6, 8)])); // span 6
    assert!(!repeat_allowed(&[date(2025, 6, 2), date(2025, 6, 9)])); // span 7
    assert!(!repeat_allowed(&[date(2025, 6, 2), date(2025, 6, 20)]));
}
