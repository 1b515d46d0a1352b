//! Time-tracking report aggregation.
//!
//! Reports use raw, unclipped durations: an entry counts in full toward the
//! day it started on. Use [`crate::timeline::bucket_by_day`] when per-day
//! clipped totals are wanted instead.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TimelineError;
use crate::timeline::{sum_durations, TimeInterval};

/// Key used by [`totals_by_key`] for entries missing the metadata field.
pub const MISSING_KEY: &str = "(none)";

/// Entries grouped by the calendar day they started on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Long form, e.g. "Tuesday, May 20, 2025"
    pub formatted_date: String,
    pub entries: Vec<TimeInterval>,
    pub total_minutes: i64,
    pub formatted_total: String,
}

/// Total minutes per metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTotal {
    pub key: String,
    pub total_minutes: i64,
}

/// Group entries by start day.
///
/// Entries keep input order inside a group. Groups come newest first when
/// `newest_first` is set, oldest first otherwise.
///
/// # Errors
/// Returns [`TimelineError::InvalidInterval`] for the first inverted entry.
pub fn group_by_start_day(
    entries: &[TimeInterval],
    newest_first: bool,
) -> Result<Vec<DayGroup>, TimelineError> {
    let mut grouped: BTreeMap<NaiveDate, Vec<TimeInterval>> = BTreeMap::new();
    for entry in entries {
        entry.validate()?;
        grouped
            .entry(entry.start.date_naive())
            .or_default()
            .push(entry.clone());
    }

    let mut groups = grouped
        .into_iter()
        .map(|(date, entries)| {
            let total_minutes = sum_durations(&entries)?;
            Ok(DayGroup {
                date,
                formatted_date: date.format("%A, %B %-d, %Y").to_string(),
                entries,
                total_minutes,
                formatted_total: format_duration(total_minutes),
            })
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;

    if newest_first {
        groups.reverse();
    }
    Ok(groups)
}

/// Sum raw minutes per string metadata field (e.g. `"project"`).
///
/// Each key's total is [`sum_durations`] over that key's entries, so seconds
/// are carried until the final truncation. Ordered by descending total, then
/// key.
pub fn totals_by_key(entries: &[TimeInterval], key: &str) -> Result<Vec<KeyTotal>, TimelineError> {
    let mut grouped: BTreeMap<String, Vec<TimeInterval>> = BTreeMap::new();
    for entry in entries {
        entry.validate()?;
        let name = entry.metadata_str(key).unwrap_or(MISSING_KEY);
        grouped
            .entry(name.to_string())
            .or_default()
            .push(entry.clone());
    }

    let mut totals = grouped
        .into_iter()
        .map(|(key, entries)| {
            Ok(KeyTotal {
                key,
                total_minutes: sum_durations(&entries)?,
            })
        })
        .collect::<Result<Vec<_>, TimelineError>>()?;
    totals.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes).then_with(|| a.key.cmp(&b.key)));
    Ok(totals)
}

/// Render minutes as `"{hours}h {minutes}m"`.
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes.div_euclid(60), minutes.rem_euclid(60))
}
