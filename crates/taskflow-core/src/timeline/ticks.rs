//! Axis tick generation.

use std::iter::FusedIterator;

use chrono::{DateTime, Datelike, Duration, Utc};

use super::window::{days_in_month, first_of_month, midnight, start_of_week};
use super::{Granularity, TimelineWindow};
use crate::error::TimelineError;

/// Lazy sequence of tick boundaries across a window.
///
/// The first tick is the granularity boundary at or before the window start;
/// ticks continue while `tick < window.end`. Cloning (or [`restart`](Self::restart))
/// replays the sequence from the first tick.
#[derive(Debug, Clone)]
pub struct Ticks {
    first: DateTime<Utc>,
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    granularity: Granularity,
}

impl Ticks {
    /// Rewind to the first tick.
    pub fn restart(&mut self) {
        self.next = Some(self.first);
    }

    fn advance(&self, tick: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = match self.granularity {
            Granularity::Day => 1,
            Granularity::Week => 7,
            Granularity::Month => {
                let date = tick.date_naive();
                i64::from(days_in_month(date.year(), date.month())?)
            }
        };
        tick.checked_add_signed(Duration::days(days))
    }
}

impl Iterator for Ticks {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if current >= self.end {
            self.next = None;
            return None;
        }
        self.next = self.advance(current);
        Some(current)
    }
}

impl FusedIterator for Ticks {}

/// Generate tick boundaries for `window` at `granularity`.
///
/// - Day: every midnight from the start day.
/// - Week: every Sunday midnight from the week containing the start.
/// - Month: the first of every month from the start month.
///
/// # Errors
/// Returns [`TimelineError::InvalidWindow`] for an invalid window.
pub fn generate_ticks(
    window: &TimelineWindow,
    granularity: Granularity,
) -> Result<Ticks, TimelineError> {
    window.validate()?;
    let day = window.start.date_naive();
    let first = match granularity {
        Granularity::Day => midnight(day),
        Granularity::Week => midnight(
            start_of_week(day).ok_or(TimelineError::OutOfRange { what: "week ticks" })?,
        ),
        Granularity::Month => midnight(first_of_month(day)),
    };
    Ok(Ticks {
        first,
        next: Some(first),
        end: window.end,
        granularity,
    })
}
