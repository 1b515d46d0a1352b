//! Timeline engine behind the calendar, Gantt and time-tracking views.
//!
//! This module provides:
//! - Positioning of intervals as clipped fractions of a visible window
//! - Day/week/month tick generation and window navigation
//! - Per-day agenda buckets with clipped duration totals
//! - Raw duration sums and date-range queries
//!
//! Every function here is pure. Anything that needs the current instant
//! takes it as an explicit `now` argument.

mod bucket;
mod interval;
mod position;
mod ticks;
mod window;

pub use bucket::{bucket_by_day, intervals_in_range, sum_durations, DayBucket};
pub use interval::TimeInterval;
pub use position::{
    position_all, position_instant, position_interval, PositionedInterval, PositionedRow,
};
pub use ticks::{generate_ticks, Ticks};
pub use window::{
    days_in_month, is_today, shift_window, Direction, Granularity, TimelineWindow, ViewConfig,
};
