pub mod agenda;
pub mod config;
pub mod position;
pub mod report;
pub mod shift;
pub mod ticks;
pub mod view;

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use taskflow_core::{Granularity, TimeInterval, TimelineWindow};

/// Window bounds shared by window-based commands.
#[derive(Args)]
pub struct WindowArgs {
    /// Window start (RFC 3339 or YYYY-MM-DD, UTC)
    #[arg(long, value_parser = parse_instant)]
    pub start: DateTime<Utc>,
    /// Window end, exclusive (RFC 3339 or YYYY-MM-DD, UTC)
    #[arg(long, value_parser = parse_instant)]
    pub end: DateTime<Utc>,
}

impl WindowArgs {
    pub fn window(&self, granularity: Granularity) -> Result<TimelineWindow, Box<dyn std::error::Error>> {
        Ok(TimelineWindow::new(self.start, self.end, granularity)?)
    }
}

/// Parse an RFC 3339 instant, or a bare date as its UTC midnight.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| format!("invalid timestamp '{s}': expected RFC 3339 or YYYY-MM-DD"))
}

/// Read a JSON array of intervals from a file, or stdin for `None` / `-`.
pub fn read_intervals(input: Option<&Path>) -> Result<Vec<TimeInterval>, Box<dyn std::error::Error>> {
    let content = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let intervals: Vec<TimeInterval> = serde_json::from_str(&content)?;
    tracing::debug!(count = intervals.len(), "read intervals");
    Ok(intervals)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
