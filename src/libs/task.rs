//! Task domain types: records, creation inputs, partial-update patches and
//! listing filters.
//!
//! Due dates are always stored timezone-naive. Offset-aware input is
//! normalized by dropping the offset as-is (no conversion to UTC), which is
//! handled by [`parse_due_date`] at the input boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status token does not match one of the three known values.
#[derive(Debug, Clone, Error)]
#[error("unknown task status '{0}', expected one of: pending, in_progress, done")]
pub struct ParseStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Ordering applied to filtered task listings, always by due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrder {
    DueDateAsc,
    DueDateDesc,
}

impl Default for TaskOrder {
    fn default() -> Self {
        TaskOrder::DueDateAsc
    }
}

/// Raised when an order token is neither `due_date_asc` nor `due_date_desc`.
#[derive(Debug, Clone, Error)]
#[error("unknown ordering '{0}', expected due_date_asc or due_date_desc")]
pub struct ParseOrderError(pub String);

impl FromStr for TaskOrder {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due_date_asc" => Ok(TaskOrder::DueDateAsc),
            "due_date_desc" => Ok(TaskOrder::DueDateDesc),
            other => Err(ParseOrderError(other.to_string())),
        }
    }
}

/// A stored task row, including all server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: NaiveDateTime,
    pub idempotency_key: Option<String>,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input for creating a task. The id and timestamps are server-assigned.
///
/// A `None` status means "use the default" (pending); creation does not
/// distinguish an absent status from an explicit pending one.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub status: Option<TaskStatus>,
    pub due_date: NaiveDateTime,
    pub idempotency_key: Option<String>,
    pub user_id: Uuid,
}

impl NewTask {
    pub fn new(title: &str, due_date: NaiveDateTime, user_id: Uuid) -> Self {
        Self {
            title: title.to_string(),
            status: None,
            due_date,
            idempotency_key: None,
            user_id,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_idempotency_key(mut self, key: &str) -> Self {
        self.idempotency_key = Some(key.to_string());
        self
    }
}

/// Partial update for a task: only fields carrying `Some` are applied.
///
/// `idempotency_key` is doubly wrapped because the column is nullable:
/// `None` leaves it untouched, `Some(None)` clears it, `Some(Some(_))`
/// replaces it.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDateTime>,
    pub idempotency_key: Option<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.due_date.is_none() && self.idempotency_key.is_none()
    }
}

/// Filter, ordering and pagination for task listings. All predicates are
/// combined with AND.
#[derive(Debug, Clone)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub user_id: Option<Uuid>,
    pub order: TaskOrder,
    pub skip: u32,
    pub limit: u32,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: None,
            user_id: None,
            order: TaskOrder::default(),
            skip: 0,
            limit: 100,
        }
    }
}

/// Per-status task counts. Every status is present, zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub pending: u32,
    pub in_progress: u32,
    pub done: u32,
}

impl TaskSummary {
    pub fn total(&self) -> u32 {
        self.pending + self.in_progress + self.done
    }
}

/// Raised when a due-date string matches no accepted format.
#[derive(Debug, Clone, Error)]
#[error("unrecognized due date '{0}', expected an ISO 8601 timestamp or YYYY-MM-DD")]
pub struct ParseDueDateError(pub String);

/// Parses a due date from user input, normalizing to a naive timestamp.
///
/// Accepted forms, tried in order: RFC 3339 with offset (the offset is
/// stripped, keeping the local clock reading), a naive `YYYY-MM-DDTHH:MM:SS`
/// or `YYYY-MM-DD HH:MM:SS` timestamp, and a bare `YYYY-MM-DD` date taken as
/// midnight.
pub fn parse_due_date(input: &str) -> Result<NaiveDateTime, ParseDueDateError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap());
    }
    Err(ParseDueDateError(input.to_string()))
}
