//! The normalized interval shape every timeline view is built from.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// A task, event, or tracked duration on the timeline.
///
/// `metadata` is opaque to the engine (assignee, color, priority, ...) and is
/// carried through every derived structure unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl TimeInterval {
    /// Create an interval without validating it.
    ///
    /// Engine operations validate their inputs, so an inverted interval built
    /// here is rejected at the point of use. Use [`try_new`](Self::try_new)
    /// to reject it at construction instead.
    pub fn new(label: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Create an interval, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns [`TimelineError::InvalidInterval`] if the interval is inverted.
    pub fn try_new(
        label: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, TimelineError> {
        let interval = Self::new(label, start, end);
        interval.validate()?;
        Ok(interval)
    }

    /// Attach opaque metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Check the `end >= start` invariant.
    ///
    /// Zero-length intervals are valid.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.end < self.start {
            return Err(TimelineError::InvalidInterval {
                label: self.label.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Get duration in whole minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Half-open overlap test against `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }

    /// The part of this interval that falls inside `[start, end)`, or zero.
    pub fn clipped_duration(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Duration {
        let from = self.start.max(start);
        let to = self.end.min(end);
        if to > from {
            to - from
        } else {
            Duration::zero()
        }
    }

    /// Look up a string field in the metadata object.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Validate every interval, returning the first failure.
pub(crate) fn validate_all(intervals: &[TimeInterval]) -> Result<(), TimelineError> {
    intervals.iter().try_for_each(TimeInterval::validate)
}
