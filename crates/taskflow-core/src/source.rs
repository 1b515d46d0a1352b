//! Boundary adapters from view-specific records to [`TimeInterval`].
//!
//! Each view carries its own record shape. They are mapped here once, so the
//! timeline engine only ever sees the normalized interval; every field that
//! is not a timestamp or the display label lands in `metadata`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::timeline::TimeInterval;

/// Priority shown on Gantt rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GanttPriority {
    Low,
    Medium,
    High,
}

/// Progress state of a Gantt task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GanttStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// A row of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttTask {
    pub id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// 0-100
    pub progress: u8,
    pub assignee: String,
    pub priority: GanttPriority,
    pub status: GanttStatus,
}

/// A tracked block of work on the time page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: u64,
    pub project: String,
    pub task: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub color: String,
}

/// A calendar event row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub user_id: u64,
    #[serde(default)]
    pub task_id: Option<u64>,
}

impl From<GanttTask> for TimeInterval {
    fn from(task: GanttTask) -> Self {
        TimeInterval::new(task.name, task.start, task.end).with_metadata(json!({
            "source": "gantt",
            "id": task.id,
            "progress": task.progress.min(100),
            "assignee": task.assignee,
            "priority": task.priority,
            "status": task.status,
        }))
    }
}

impl From<TimeEntry> for TimeInterval {
    fn from(entry: TimeEntry) -> Self {
        TimeInterval::new(entry.task, entry.start_time, entry.end_time).with_metadata(json!({
            "source": "time_entry",
            "id": entry.id,
            "project": entry.project,
            "color": entry.color,
        }))
    }
}

impl From<CalendarEvent> for TimeInterval {
    fn from(event: CalendarEvent) -> Self {
        TimeInterval::new(event.title, event.start_datetime, event.end_datetime).with_metadata(
            json!({
                "source": "calendar",
                "id": event.id,
                "description": event.description,
                "user_id": event.user_id,
                "task_id": event.task_id,
            }),
        )
    }
}

/// Convert a batch of records at the boundary.
pub fn to_intervals<T: Into<TimeInterval>>(records: impl IntoIterator<Item = T>) -> Vec<TimeInterval> {
    records.into_iter().map(Into::into).collect()
}
