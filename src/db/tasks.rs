//! Task store: filtered, ordered, paginated reads and idempotent writes.
//!
//! Follows the same contract as the user store (point lookup, skip/limit
//! listing, insert, field-level partial update, delete) and adds the
//! task-specific reads: idempotency-key lookup, per-user listing, the
//! multi-predicate filter and the grouped status summary.
//!
//! Caller responsibilities: the referenced user is validated by the surface
//! before `insert` is invoked, never here. The idempotency check-then-insert
//! is not guarded against two concurrent requests carrying the same new key;
//! the loser of that race gets the unique constraint's
//! [`StoreError::Conflict`](crate::libs::error::StoreError::Conflict).

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::error::StoreError;
use crate::libs::task::{NewTask, Task, TaskFilter, TaskOrder, TaskPatch, TaskStatus, TaskSummary};
use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use std::str::FromStr;
use uuid::Uuid;

const INSERT_TASK: &str = "INSERT INTO tasks (id, title, status, due_date, idempotency_key, user_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_TASK: &str = "SELECT id, title, status, due_date, idempotency_key, user_id, created_at, updated_at FROM tasks";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SELECT_SUMMARY: &str = "SELECT status, COUNT(id) FROM tasks GROUP BY status";

pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    pub fn new(config: &Config) -> Result<Self> {
        let db = Db::new(config)?;
        Ok(Self { conn: db.conn })
    }

    fn map_row(row: &Row) -> rusqlite::Result<Task> {
        let status: String = row.get(2)?;
        let status = TaskStatus::from_str(&status)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e)))?;
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            status,
            due_date: row.get(3)?,
            idempotency_key: row.get(4)?,
            user_id: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    pub fn get(&mut self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TASK), params![id], Self::map_row)
            .optional()?;
        Ok(task)
    }

    pub fn get_by_idempotency_key(&mut self, key: &str) -> Result<Option<Task>, StoreError> {
        let task = self
            .conn
            .query_row(&format!("{} WHERE idempotency_key = ?1", SELECT_TASK), params![key], Self::map_row)
            .optional()?;
        Ok(task)
    }

    /// Tasks owned by one user, paginated. No ordering contract beyond what
    /// the storage happens to return; ordered reads go through
    /// [`fetch_filtered`](Self::fetch_filtered).
    pub fn fetch_by_user(&mut self, user_id: Uuid, skip: u32, limit: u32) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE user_id = ?1 LIMIT ?2 OFFSET ?3", SELECT_TASK))?;
        let task_iter = stmt.query_map(params![user_id, limit, skip], Self::map_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Filtered, ordered, paginated listing.
    ///
    /// Status and user predicates are combined with AND; ordering is by due
    /// date with the row id as a deterministic tie-break; skip/limit apply
    /// after ordering. A zero limit or an unknown user simply yields an
    /// empty result.
    pub fn fetch_filtered(&mut self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            values.push(Box::new(status.as_str()));
            clauses.push(format!("status = ?{}", values.len()));
        }
        if let Some(user_id) = filter.user_id {
            values.push(Box::new(user_id));
            clauses.push(format!("user_id = ?{}", values.len()));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let order_sql = match filter.order {
            TaskOrder::DueDateAsc => "due_date ASC, id ASC",
            TaskOrder::DueDateDesc => "due_date DESC, id ASC",
        };

        values.push(Box::new(filter.limit));
        let limit_idx = values.len();
        values.push(Box::new(filter.skip));
        let skip_idx = values.len();

        let sql = format!(
            "{}{} ORDER BY {} LIMIT ?{} OFFSET ?{}",
            SELECT_TASK, where_sql, order_sql, limit_idx, skip_idx
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(values.iter()), Self::map_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Per-status counts over the whole table in one grouped query, with
    /// every status present even at zero.
    pub fn summary(&mut self) -> Result<TaskSummary, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_SUMMARY)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)))?;

        let mut summary = TaskSummary::default();
        for row in rows {
            let (status, count) = row?;
            match TaskStatus::from_str(&status) {
                Ok(TaskStatus::Pending) => summary.pending = count,
                Ok(TaskStatus::InProgress) => summary.in_progress = count,
                Ok(TaskStatus::Done) => summary.done = count,
                Err(_) => {}
            }
        }
        Ok(summary)
    }

    /// Creates a task, deduplicating on the idempotency key.
    ///
    /// When the key is already stored, the original row is returned as-is,
    /// even if the rest of the input differs; at-most-once creation is keyed
    /// on the key alone. Otherwise the row is inserted with status defaulted
    /// to pending and read back with its server-assigned fields.
    pub fn insert(&mut self, new: &NewTask) -> Result<Task, StoreError> {
        if let Some(key) = &new.idempotency_key {
            if let Some(existing) = self.get_by_idempotency_key(key)? {
                return Ok(existing);
            }
        }

        let id = Uuid::new_v4();
        let status = new.status.unwrap_or_default();
        self.conn.execute(
            INSERT_TASK,
            params![id, new.title, status.as_str(), new.due_date, new.idempotency_key, new.user_id],
        )?;

        let task = self.conn.query_row(&format!("{} WHERE id = ?1", SELECT_TASK), params![id], Self::map_row)?;
        Ok(task)
    }

    /// Applies only the fields present in `patch`, refreshes `updated_at`
    /// and returns the stored row, or `None` when the id is unknown. An
    /// empty patch still refreshes `updated_at`.
    pub fn update(&mut self, id: Uuid, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }

        let mut assignments: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &patch.title {
            values.push(Box::new(title.clone()));
            assignments.push(format!("title = ?{}", values.len()));
        }
        if let Some(status) = patch.status {
            values.push(Box::new(status.as_str()));
            assignments.push(format!("status = ?{}", values.len()));
        }
        if let Some(due_date) = patch.due_date {
            values.push(Box::new(due_date));
            assignments.push(format!("due_date = ?{}", values.len()));
        }
        if let Some(idempotency_key) = &patch.idempotency_key {
            values.push(Box::new(idempotency_key.clone()));
            assignments.push(format!("idempotency_key = ?{}", values.len()));
        }
        assignments.push("updated_at = CURRENT_TIMESTAMP".to_string());

        values.push(Box::new(id));
        let sql = format!("UPDATE tasks SET {} WHERE id = ?{}", assignments.join(", "), values.len());
        self.conn.execute(&sql, params_from_iter(values.iter()))?;

        self.get(id)
    }

    /// Removes a task. Returns whether a row existed; deleting an unknown
    /// id is not an error.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(affected > 0)
    }
}
