//! Agenda day buckets, duration sums and range queries.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::interval::validate_all;
use super::window::midnight;
use super::{TimeInterval, TimelineWindow};
use crate::error::TimelineError;

/// Intervals touching one calendar day, with their clipped total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub intervals: Vec<TimeInterval>,
    pub total_duration_minutes: i64,
}

/// Group intervals into one bucket per calendar day of the window.
///
/// An interval belongs to a day when `start < day_end && end > day_start`,
/// so an interval crossing midnight lands in both days. Each bucket's total
/// counts only the portion of each interval inside that day. Days without
/// intervals still get an empty bucket.
///
/// # Errors
/// Fails before bucketing anything if the window or any interval is invalid.
pub fn bucket_by_day(
    intervals: &[TimeInterval],
    window: &TimelineWindow,
) -> Result<Vec<DayBucket>, TimelineError> {
    window.validate()?;
    validate_all(intervals)?;

    // Stable, so equal starts keep input order
    let mut sorted: Vec<&TimeInterval> = intervals.iter().collect();
    sorted.sort_by_key(|interval| interval.start);

    let buckets = window
        .days()?
        .into_iter()
        .map(|date| {
            let (day_start, day_end) = day_bounds(date);
            let members: Vec<TimeInterval> = sorted
                .iter()
                .filter(|interval| interval.overlaps(day_start, day_end))
                .map(|interval| (*interval).clone())
                .collect();
            let total = members.iter().try_fold(Duration::zero(), |acc, interval| {
                acc.checked_add(&interval.clipped_duration(day_start, day_end))
                    .ok_or(TimelineError::OutOfRange { what: "day bucket total" })
            })?;
            Ok(DayBucket {
                date,
                intervals: members,
                total_duration_minutes: total.num_minutes(),
            })
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;

    tracing::debug!(
        days = buckets.len(),
        intervals = intervals.len(),
        "bucketed intervals by day"
    );
    Ok(buckets)
}

/// Raw sum of `end - start` across all intervals, in minutes.
///
/// No clipping is applied; compare with the per-day clipped totals of
/// [`bucket_by_day`].
///
/// # Errors
/// Returns [`TimelineError::InvalidInterval`] for the first inverted interval
/// and [`TimelineError::OutOfRange`] if the total overflows.
pub fn sum_durations(intervals: &[TimeInterval]) -> Result<i64, TimelineError> {
    Ok(total_duration(intervals)?.num_minutes())
}

/// Exact sum of `end - start`, before any truncation to minutes.
fn total_duration(intervals: &[TimeInterval]) -> Result<Duration, TimelineError> {
    intervals.iter().try_fold(Duration::zero(), |acc, interval| {
        interval.validate()?;
        acc.checked_add(&interval.duration())
            .ok_or(TimelineError::OutOfRange { what: "duration total" })
    })
}

/// Intervals that start in, end in, or enclose the closed range
/// `[start, end]`, ordered by start (stable).
///
/// # Errors
/// [`TimelineError::InvalidWindow`] when `end < start`,
/// [`TimelineError::InvalidInterval`] for the first inverted interval.
pub fn intervals_in_range(
    intervals: &[TimeInterval],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<TimeInterval>, TimelineError> {
    if end < start {
        return Err(TimelineError::InvalidWindow { start, end });
    }
    validate_all(intervals)?;

    let mut matched: Vec<TimeInterval> = intervals
        .iter()
        .filter(|interval| interval.start <= end && interval.end >= start)
        .cloned()
        .collect();
    matched.sort_by_key(|interval| interval.start);
    Ok(matched)
}

/// Bounds of a calendar day. The last representable day ends at `MAX_UTC`.
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = midnight(date);
    let end = start
        .checked_add_signed(Duration::days(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}
