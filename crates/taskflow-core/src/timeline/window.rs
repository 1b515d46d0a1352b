//! Visible date windows, calendar helpers and window navigation.
//!
//! Calendar days are UTC days: a day starts at 00:00:00 UTC and the
//! following day's midnight is its exclusive end.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Tick resolution of a timeline view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "d" => Ok(Self::Day),
            "week" | "w" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            other => Err(format!("unknown granularity '{other}' (expected day, week or month)")),
        }
    }
}

/// Navigation direction for [`shift_window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prev" | "previous" | "back" => Ok(Self::Previous),
            "next" | "forward" => Ok(Self::Next),
            other => Err(format!("unknown direction '{other}' (expected prev or next)")),
        }
    }
}

/// Sizes of the windows produced by [`TimelineWindow::for_view`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Days shown before the anchor day in day view
    #[serde(default = "default_day_view_lead_days")]
    pub day_view_lead_days: u32,
    #[serde(default = "default_day_view_span_days")]
    pub day_view_span_days: u32,
    #[serde(default = "default_week_view_span_days")]
    pub week_view_span_days: u32,
}

fn default_day_view_lead_days() -> u32 {
    2
}
fn default_day_view_span_days() -> u32 {
    5
}
fn default_week_view_span_days() -> u32 {
    14
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            day_view_lead_days: default_day_view_lead_days(),
            day_view_span_days: default_day_view_span_days(),
            week_view_span_days: default_week_view_span_days(),
        }
    }
}

/// The visible range of a timeline view, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
}

impl TimelineWindow {
    /// Create a validated window.
    ///
    /// # Errors
    /// Returns [`TimelineError::InvalidWindow`] unless `start < end`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<Self, TimelineError> {
        let window = Self {
            start,
            end,
            granularity,
        };
        window.validate()?;
        Ok(window)
    }

    /// Build the window a view shows around `anchor`.
    ///
    /// - Day: `day_view_lead_days` before the anchor's day, `day_view_span_days` long.
    /// - Week: from the Sunday on or before the anchor, `week_view_span_days` long.
    /// - Month: the anchor's whole calendar month.
    pub fn for_view(
        anchor: DateTime<Utc>,
        granularity: Granularity,
        config: &ViewConfig,
    ) -> Result<Self, TimelineError> {
        let day = anchor.date_naive();
        let (first, len_days) = match granularity {
            Granularity::Day => {
                let first = day
                    .checked_sub_signed(Duration::days(i64::from(config.day_view_lead_days)))
                    .ok_or(TimelineError::OutOfRange { what: "day view" })?;
                (first, config.day_view_span_days)
            }
            Granularity::Week => (
                start_of_week(day).ok_or(TimelineError::OutOfRange { what: "week view" })?,
                config.week_view_span_days,
            ),
            Granularity::Month => {
                let first = first_of_month(day);
                let len = days_in_month(first.year(), first.month())
                    .ok_or(TimelineError::OutOfRange { what: "month view" })?;
                (first, len)
            }
        };

        let start = midnight(first);
        let end = start
            .checked_add_signed(Duration::days(i64::from(len_days)))
            .ok_or(TimelineError::OutOfRange { what: "view window" })?;
        Self::new(start, end, granularity)
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.start >= self.end {
            return Err(TimelineError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Calendar days touched by the window, ascending.
    ///
    /// A day is included when `day_start < end && day_end > start`.
    pub fn days(&self) -> Result<Vec<NaiveDate>, TimelineError> {
        self.validate()?;
        let mut days = Vec::new();
        let mut day = self.start.date_naive();
        while midnight(day) < self.end {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                // Last representable day
                None => break,
            }
        }
        Ok(days)
    }

    /// Tick boundaries at this window's own granularity.
    pub fn ticks(&self) -> Result<super::Ticks, TimelineError> {
        super::generate_ticks(self, self.granularity)
    }

    /// Move this window by one unit of its own granularity.
    pub fn shift(&self, direction: Direction) -> Result<Self, TimelineError> {
        shift_window(self, self.granularity, direction)
    }
}

/// Move a window by exactly one granularity unit.
///
/// Day and week shifts move both endpoints by 1 or 7 days. Month shifts move
/// both endpoints to the same day-of-month in the adjacent month, clamped to
/// that month's last day, so window length may change.
///
/// # Errors
/// Fails with [`TimelineError::InvalidWindow`] for an invalid input window or
/// when clamping collapses the shifted window, and with
/// [`TimelineError::OutOfRange`] if the shift leaves chrono's range.
pub fn shift_window(
    window: &TimelineWindow,
    granularity: Granularity,
    direction: Direction,
) -> Result<TimelineWindow, TimelineError> {
    window.validate()?;

    let shift_point = |at: DateTime<Utc>| -> Option<DateTime<Utc>> {
        match (granularity, direction) {
            (Granularity::Day, Direction::Next) => at.checked_add_signed(Duration::days(1)),
            (Granularity::Day, Direction::Previous) => at.checked_sub_signed(Duration::days(1)),
            (Granularity::Week, Direction::Next) => at.checked_add_signed(Duration::days(7)),
            (Granularity::Week, Direction::Previous) => at.checked_sub_signed(Duration::days(7)),
            (Granularity::Month, Direction::Next) => at.checked_add_months(Months::new(1)),
            (Granularity::Month, Direction::Previous) => at.checked_sub_months(Months::new(1)),
        }
    };

    let start = shift_point(window.start).ok_or(TimelineError::OutOfRange { what: "window shift" })?;
    let end = shift_point(window.end).ok_or(TimelineError::OutOfRange { what: "window shift" })?;
    tracing::debug!(%granularity, ?direction, %start, %end, "shifted timeline window");
    TimelineWindow::new(start, end, window.granularity)
}

/// Whether `date` is the calendar day containing `now`.
pub fn is_today(date: NaiveDate, now: DateTime<Utc>) -> bool {
    date == now.date_naive()
}

/// Number of days in a month, via the day before the first of the next month.
///
/// Returns `None` for a month outside `1..=12` or a year chrono cannot
/// represent.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

pub(crate) fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Sunday on or before `day`, or `None` before the first representable Sunday.
pub(crate) fn start_of_week(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_signed(Duration::days(i64::from(day.weekday().num_days_from_sunday())))
}

pub(crate) fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn days_in_month_handles_all_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
        assert_eq!(days_in_month(2025, 0), None);
    }

    #[test]
    fn new_rejects_empty_window() {
        let t = utc(2025, 5, 1, 0);
        assert!(matches!(
            TimelineWindow::new(t, t, Granularity::Day),
            Err(TimelineError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn start_of_week_is_sunday() {
        // 2025-05-15 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2025, 5, 15).unwrap();
        assert_eq!(start_of_week(thursday), NaiveDate::from_ymd_opt(2025, 5, 11));
        let sunday = NaiveDate::from_ymd_opt(2025, 5, 11).unwrap();
        assert_eq!(start_of_week(sunday), Some(sunday));
    }

    #[test]
    fn start_of_week_below_min_date_is_none() {
        let first = NaiveDate::MIN;
        if first.weekday() != chrono::Weekday::Sun {
            assert_eq!(start_of_week(first), None);
        }
    }

    #[test]
    fn for_view_week_at_min_date_is_out_of_range() {
        let anchor = DateTime::<Utc>::MIN_UTC;
        let result = TimelineWindow::for_view(anchor, Granularity::Week, &ViewConfig::default());
        if anchor.date_naive().weekday() != chrono::Weekday::Sun {
            assert!(matches!(result, Err(TimelineError::OutOfRange { .. })));
        }
    }

    #[test]
    fn days_reaches_last_representable_day() {
        let end = DateTime::<Utc>::MAX_UTC;
        let window =
            TimelineWindow::new(end - Duration::days(2), end, Granularity::Day).unwrap();
        let days = window.days().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days.last(), Some(&NaiveDate::MAX));
    }

    #[test]
    fn for_view_day_centers_on_anchor() {
        let window =
            TimelineWindow::for_view(utc(2025, 5, 15, 13), Granularity::Day, &ViewConfig::default())
                .unwrap();
        assert_eq!(window.start, utc(2025, 5, 13, 0));
        assert_eq!(window.end, utc(2025, 5, 18, 0));
    }

    #[test]
    fn for_view_week_starts_sunday_and_spans_two_weeks() {
        let window =
            TimelineWindow::for_view(utc(2025, 5, 15, 13), Granularity::Week, &ViewConfig::default())
                .unwrap();
        assert_eq!(window.start, utc(2025, 5, 11, 0));
        assert_eq!(window.end, utc(2025, 5, 25, 0));
        assert_eq!(window.days().unwrap().len(), 14);
    }

    #[test]
    fn for_view_month_covers_leap_february() {
        let window =
            TimelineWindow::for_view(utc(2024, 2, 10, 8), Granularity::Month, &ViewConfig::default())
                .unwrap();
        assert_eq!(window.start, utc(2024, 2, 1, 0));
        assert_eq!(window.end, utc(2024, 3, 1, 0));
        assert_eq!(window.days().unwrap().len(), 29);
    }

    #[test]
    fn for_view_rejects_zero_span_config() {
        let config = ViewConfig {
            day_view_span_days: 0,
            ..ViewConfig::default()
        };
        assert!(TimelineWindow::for_view(utc(2025, 5, 15, 0), Granularity::Day, &config).is_err());
    }

    #[test]
    fn days_includes_partial_days() {
        let window = TimelineWindow::new(utc(2025, 5, 1, 12), utc(2025, 5, 3, 6), Granularity::Day)
            .unwrap();
        let days = window.days().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2025, 5, 3).unwrap());
    }

    #[test]
    fn shift_day_and_week_preserve_length() {
        let window = TimelineWindow::new(utc(2025, 5, 1, 0), utc(2025, 5, 8, 0), Granularity::Week)
            .unwrap();
        let next = shift_window(&window, Granularity::Day, Direction::Next).unwrap();
        assert_eq!(next.start, utc(2025, 5, 2, 0));
        assert_eq!(next.span(), window.span());

        let prev = shift_window(&window, Granularity::Week, Direction::Previous).unwrap();
        assert_eq!(prev.start, utc(2025, 4, 24, 0));
        assert_eq!(prev.end, utc(2025, 5, 1, 0));
        assert_eq!(prev.granularity, Granularity::Week);
    }

    #[test]
    fn shift_month_clamps_to_last_day() {
        let window = TimelineWindow::new(utc(2024, 1, 31, 9), utc(2024, 3, 31, 9), Granularity::Month)
            .unwrap();
        let next = window.shift(Direction::Next).unwrap();
        assert_eq!(next.start, utc(2024, 2, 29, 9));
        assert_eq!(next.end, utc(2024, 4, 30, 9));
    }

    #[test]
    fn shift_month_moves_whole_month_windows() {
        let window = TimelineWindow::new(utc(2025, 3, 1, 0), utc(2025, 4, 1, 0), Granularity::Month)
            .unwrap();
        let prev = window.shift(Direction::Previous).unwrap();
        assert_eq!(prev.start, utc(2025, 2, 1, 0));
        assert_eq!(prev.end, utc(2025, 3, 1, 0));
    }

    #[test]
    fn shift_month_rejects_collapsed_window() {
        let window = TimelineWindow::new(utc(2025, 1, 30, 0), utc(2025, 1, 31, 0), Granularity::Month)
            .unwrap();
        assert!(matches!(
            window.shift(Direction::Next),
            Err(TimelineError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn granularity_and_direction_parse() {
        assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("prev".parse::<Direction>().unwrap(), Direction::Previous);
        assert!("year".parse::<Granularity>().is_err());
    }

    #[test]
    fn is_today_uses_explicit_now() {
        let now = utc(2025, 5, 20, 23);
        assert!(is_today(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(), now));
        assert!(!is_today(NaiveDate::from_ymd_opt(2025, 5, 21).unwrap(), now));
    }
}
