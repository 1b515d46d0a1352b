//! Date-to-fraction positioning for Gantt and calendar rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TimeInterval, TimelineWindow};
use crate::error::TimelineError;

/// Horizontal placement of an interval inside a window, as fractions of the
/// window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedInterval {
    pub left_fraction: f64,
    pub width_fraction: f64,
    pub visible: bool,
}

impl PositionedInterval {
    pub const HIDDEN: Self = Self {
        left_fraction: 0.0,
        width_fraction: 0.0,
        visible: false,
    };

    /// Right edge, `left + width`
    pub fn right_fraction(&self) -> f64 {
        self.left_fraction + self.width_fraction
    }
}

/// A positioned interval together with its source, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedRow {
    pub interval: TimeInterval,
    #[serde(flatten)]
    pub position: PositionedInterval,
}

/// Place `interval` inside `window`.
///
/// Intervals entirely outside the window, or touching it only at a boundary,
/// come back hidden. Partially overlapping intervals are clipped at the
/// window edges.
///
/// # Errors
/// [`TimelineError::InvalidWindow`] when the window is empty or inverted,
/// [`TimelineError::InvalidInterval`] when `interval.end < interval.start`.
pub fn position_interval(
    interval: &TimeInterval,
    window: &TimelineWindow,
) -> Result<PositionedInterval, TimelineError> {
    window.validate()?;
    interval.validate()?;

    let span = millis(window.end, window.start);
    let raw_left = millis(interval.start, window.start) / span;
    let raw_right = millis(interval.end, window.start) / span;

    if raw_right <= 0.0 || raw_left >= 1.0 {
        return Ok(PositionedInterval::HIDDEN);
    }

    let left = raw_left.max(0.0);
    let right = raw_right.min(1.0);
    let width = right - left;
    if width <= 0.0 {
        return Ok(PositionedInterval::HIDDEN);
    }

    Ok(PositionedInterval {
        left_fraction: left,
        width_fraction: width,
        visible: true,
    })
}

/// Position every interval in input order, failing on the first invalid one.
pub fn position_all(
    intervals: &[TimeInterval],
    window: &TimelineWindow,
) -> Result<Vec<PositionedRow>, TimelineError> {
    window.validate()?;
    let rows = intervals
        .iter()
        .map(|interval| {
            position_interval(interval, window).map(|position| PositionedRow {
                interval: interval.clone(),
                position,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| tracing::warn!(%err, "rejected interval while positioning"))?;

    tracing::debug!(
        rows = rows.len(),
        visible = rows.iter().filter(|r| r.position.visible).count(),
        "positioned timeline rows"
    );
    Ok(rows)
}

/// Fraction of the window at which `instant` sits, or `None` outside
/// `[start, end)`. Used for the "now" marker with a caller-supplied clock.
pub fn position_instant(
    instant: DateTime<Utc>,
    window: &TimelineWindow,
) -> Result<Option<f64>, TimelineError> {
    window.validate()?;
    if instant < window.start || instant >= window.end {
        return Ok(None);
    }
    Ok(Some(millis(instant, window.start) / millis(window.end, window.start)))
}

fn millis(to: DateTime<Utc>, from: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64
}
