//! # TaskFlow Core Library
//!
//! The timeline engine behind TaskFlow's calendar, Gantt and time-tracking
//! views, plus the small configuration layer the CLI uses.
//!
//! ## Architecture
//!
//! - **Timeline**: pure functions that position intervals inside a visible
//!   window, generate axis ticks, navigate windows and bucket intervals by
//!   calendar day
//! - **Report**: time-tracking aggregation over raw durations
//! - **Source**: adapters from view-specific records to [`TimeInterval`]
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimeInterval`]: The single normalized interval shape
//! - [`TimelineWindow`]: The visible range of a view
//! - [`Config`]: Application configuration management

pub mod error;
pub mod report;
pub mod source;
pub mod storage;
pub mod timeline;

pub use error::{ConfigError, CoreError, TimelineError};
pub use report::{format_duration, group_by_start_day, totals_by_key, DayGroup, KeyTotal};
pub use storage::Config;
pub use timeline::{
    bucket_by_day, generate_ticks, intervals_in_range, position_all, position_instant,
    position_interval, shift_window, sum_durations, DayBucket, Direction, Granularity,
    PositionedInterval, PositionedRow, TimeInterval, TimelineWindow,
};
