//! Integration tests for the timeline engine.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use taskflow_core::source::{to_intervals, GanttPriority, GanttStatus, GanttTask};
use taskflow_core::timeline::ViewConfig;
use taskflow_core::{
    bucket_by_day, generate_ticks, position_all, position_interval, shift_window, sum_durations,
    Direction, Granularity, TimeInterval, TimelineError, TimelineWindow,
};

fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

fn may_week() -> TimelineWindow {
    TimelineWindow::new(utc(2025, 5, 1, 0), utc(2025, 5, 8, 0), Granularity::Day).unwrap()
}

#[test]
fn test_agenda_and_raw_totals_for_overnight_work() {
    let interval = TimeInterval::new("overnight", utc(2025, 5, 3, 22), utc(2025, 5, 4, 2));
    let buckets = bucket_by_day(std::slice::from_ref(&interval), &may_week()).unwrap();

    let totals: Vec<(NaiveDate, i64)> = buckets
        .iter()
        .map(|b| (b.date, b.total_duration_minutes))
        .collect();
    assert_eq!(totals.len(), 7);
    assert_eq!(totals[2], (NaiveDate::from_ymd_opt(2025, 5, 3).unwrap(), 120));
    assert_eq!(totals[3], (NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(), 120));

    let clipped: i64 = buckets.iter().map(|b| b.total_duration_minutes).sum();
    assert_eq!(clipped, sum_durations(&[interval]).unwrap());
}

#[test]
fn test_leap_february_month_ticks() {
    let window =
        TimelineWindow::new(utc(2024, 2, 1, 0), utc(2024, 3, 15, 0), Granularity::Month).unwrap();
    let ticks: Vec<_> = window.ticks().unwrap().collect();
    assert_eq!(ticks, vec![utc(2024, 2, 1, 0), utc(2024, 3, 1, 0)]);
    assert_eq!((ticks[1] - ticks[0]).num_days(), 29);
}

#[test]
fn test_gantt_view_navigation_workflow() {
    let tasks = vec![
        GanttTask {
            id: "1".into(),
            name: "Research & Planning".into(),
            start: utc(2025, 5, 15, 0),
            end: utc(2025, 5, 20, 0),
            progress: 100,
            assignee: "Alex Johnson".into(),
            priority: GanttPriority::High,
            status: GanttStatus::Completed,
        },
        GanttTask {
            id: "3".into(),
            name: "Frontend Development".into(),
            start: utc(2025, 5, 22, 0),
            end: utc(2025, 6, 5, 0),
            progress: 40,
            assignee: "Emily Davis".into(),
            priority: GanttPriority::Medium,
            status: GanttStatus::InProgress,
        },
    ];
    let intervals = to_intervals(tasks);

    // Week view anchored on Thursday 2025-05-15 starts Sunday 05-11 for 14 days
    let window =
        TimelineWindow::for_view(utc(2025, 5, 15, 9), Granularity::Week, &ViewConfig::default())
            .unwrap();
    let rows = position_all(&intervals, &window).unwrap();
    assert!(rows[0].position.visible);
    assert!((rows[0].position.left_fraction - 4.0 / 14.0).abs() < 1e-9);
    assert!((rows[0].position.width_fraction - 5.0 / 14.0).abs() < 1e-9);
    // Runs past the window end: clipped at the right edge
    assert!((rows[1].position.right_fraction() - 1.0).abs() < 1e-9);
    assert!((rows[1].position.width_fraction - 3.0 / 14.0).abs() < 1e-9);

    // 05-18..06-01 still shows the tail of the first task
    let next = shift_window(&window, Granularity::Week, Direction::Next).unwrap();
    let rows = position_all(&intervals, &next).unwrap();
    assert!(rows[0].position.visible);
    assert_eq!(rows[0].position.left_fraction, 0.0);

    let after = next.shift(Direction::Next).unwrap();
    assert_eq!(after.start, utc(2025, 5, 25, 0));
    let rows = position_all(&intervals, &after).unwrap();
    assert!(!rows[0].position.visible);
    assert!(rows[1].position.visible);
}

#[test]
fn test_millisecond_inversion_is_rejected_everywhere() {
    let start = utc(2025, 5, 3, 10);
    let bad = TimeInterval::new("bad", start, start - Duration::milliseconds(1));
    let window = may_week();

    assert!(matches!(
        position_interval(&bad, &window),
        Err(TimelineError::InvalidInterval { .. })
    ));
    assert!(matches!(
        bucket_by_day(std::slice::from_ref(&bad), &window),
        Err(TimelineError::InvalidInterval { .. })
    ));
    assert!(matches!(
        sum_durations(std::slice::from_ref(&bad)),
        Err(TimelineError::InvalidInterval { .. })
    ));
}

#[test]
fn test_outputs_are_idempotent() {
    let intervals = vec![
        TimeInterval::new("a", utc(2025, 5, 2, 9), utc(2025, 5, 2, 17)),
        TimeInterval::new("b", utc(2025, 4, 30, 12), utc(2025, 5, 1, 12)),
    ];
    let window = may_week();

    let rows_a = serde_json::to_string(&position_all(&intervals, &window).unwrap()).unwrap();
    let rows_b = serde_json::to_string(&position_all(&intervals, &window).unwrap()).unwrap();
    assert_eq!(rows_a, rows_b);

    let buckets_a = serde_json::to_string(&bucket_by_day(&intervals, &window).unwrap()).unwrap();
    let buckets_b = serde_json::to_string(&bucket_by_day(&intervals, &window).unwrap()).unwrap();
    assert_eq!(buckets_a, buckets_b);

    let ticks_a: Vec<_> = generate_ticks(&window, Granularity::Week).unwrap().collect();
    let ticks_b: Vec<_> = generate_ticks(&window, Granularity::Week).unwrap().collect();
    assert_eq!(ticks_a, ticks_b);
}

fn base() -> DateTime<Utc> {
    utc(2025, 5, 1, 0)
}

proptest! {
    #[test]
    fn prop_position_stays_in_unit_range(
        window_len in 1i64..100_000,
        start_off in -200_000i64..200_000,
        len in 0i64..200_000,
    ) {
        let window = TimelineWindow::new(
            base(),
            base() + Duration::minutes(window_len),
            Granularity::Day,
        ).unwrap();
        let start = base() + Duration::minutes(start_off);
        let interval = TimeInterval::new("p", start, start + Duration::minutes(len));
        let pos = position_interval(&interval, &window).unwrap();

        let fully_outside = interval.end <= window.start || interval.start >= window.end;
        if fully_outside {
            prop_assert!(!pos.visible);
        }
        if pos.visible {
            prop_assert!(pos.left_fraction >= 0.0);
            prop_assert!(pos.width_fraction > 0.0);
            prop_assert!(pos.right_fraction() <= 1.0 + 1e-12);

            let inside = interval.clipped_duration(window.start, window.end).num_minutes() as f64;
            let expected = inside / window_len as f64;
            prop_assert!((pos.width_fraction - expected).abs() < 1e-9);
        } else {
            prop_assert_eq!(pos.left_fraction, 0.0);
            prop_assert_eq!(pos.width_fraction, 0.0);
        }
    }

    #[test]
    fn prop_one_bucket_per_day(days in 1i64..60, hour in 0i64..24) {
        let start = base() + Duration::hours(hour);
        let window = TimelineWindow::new(start, start + Duration::days(days), Granularity::Day).unwrap();
        let buckets = bucket_by_day(&[], &window).unwrap();
        let expected = if hour == 0 { days } else { days + 1 };
        prop_assert_eq!(buckets.len() as i64, expected);
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
    }

    #[test]
    fn prop_day_ticks_match_whole_days(days in 1i64..400) {
        let window = TimelineWindow::new(base(), base() + Duration::days(days), Granularity::Day).unwrap();
        let count = generate_ticks(&window, Granularity::Day).unwrap().count();
        prop_assert_eq!(count as i64, days);
    }

    #[test]
    fn prop_clipped_bucket_totals_never_exceed_raw(
        start_off in 0i64..(7 * 24 * 60),
        len in 0i64..(3 * 24 * 60),
    ) {
        let start = base() + Duration::minutes(start_off);
        let interval = TimeInterval::new("p", start, start + Duration::minutes(len));
        let window = TimelineWindow::new(base(), base() + Duration::days(7), Granularity::Day).unwrap();
        let buckets = bucket_by_day(std::slice::from_ref(&interval), &window).unwrap();
        let clipped: i64 = buckets.iter().map(|b| b.total_duration_minutes).sum();
        prop_assert!(clipped <= sum_durations(&[interval]).unwrap());
    }
}
