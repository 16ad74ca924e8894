//! User directory store.
//!
//! Concrete store over the `users` table following the shared contract of
//! both stores: point lookup returns `Option`, listing takes skip/limit,
//! insert and update commit and hand back the refreshed row, delete reports
//! whether a row existed. Email uniqueness is backed by the table's UNIQUE
//! constraint; callers are expected to look up by email first and treat the
//! constraint as the last line of defense.

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::error::StoreError;
use crate::libs::user::{NewUser, User, UserPatch};
use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use uuid::Uuid;

const INSERT_USER: &str = "INSERT INTO users (id, name, email, phone_number) VALUES (?1, ?2, ?3, ?4)";
const SELECT_USER: &str = "SELECT id, name, email, phone_number FROM users";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";

pub struct Users {
    conn: Connection,
}

impl Users {
    pub fn new(config: &Config) -> Result<Self> {
        let db = Db::new(config)?;
        Ok(Self { conn: db.conn })
    }

    fn map_row(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone_number: row.get(3)?,
        })
    }

    pub fn get(&mut self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_USER), params![id], Self::map_row)
            .optional()?;
        Ok(user)
    }

    pub fn get_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .conn
            .query_row(&format!("{} WHERE email = ?1", SELECT_USER), params![email], Self::map_row)
            .optional()?;
        Ok(user)
    }

    pub fn list(&mut self, skip: u32, limit: u32) -> Result<Vec<User>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{} LIMIT ?1 OFFSET ?2", SELECT_USER))?;
        let user_iter = stmt.query_map(params![limit, skip], Self::map_row)?;

        let mut users = Vec::new();
        for user in user_iter {
            users.push(user?);
        }
        Ok(users)
    }

    /// Inserts a new user and returns the stored row. A duplicate email is
    /// rejected by the unique constraint and surfaces as
    /// [`StoreError::Conflict`].
    pub fn create(&mut self, new: &NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        self.conn.execute(INSERT_USER, params![id, new.name, new.email, new.phone_number])?;

        let user = self.conn.query_row(&format!("{} WHERE id = ?1", SELECT_USER), params![id], Self::map_row)?;
        Ok(user)
    }

    /// Applies only the fields present in `patch` and returns the refreshed
    /// row, or `None` when the id is unknown. A `Some(None)` phone number
    /// clears the column.
    pub fn update(&mut self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, StoreError> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }

        if !patch.is_empty() {
            let mut assignments: Vec<String> = Vec::new();
            let mut values: Vec<Box<dyn ToSql>> = Vec::new();

            if let Some(name) = &patch.name {
                values.push(Box::new(name.clone()));
                assignments.push(format!("name = ?{}", values.len()));
            }
            if let Some(email) = &patch.email {
                values.push(Box::new(email.clone()));
                assignments.push(format!("email = ?{}", values.len()));
            }
            if let Some(phone_number) = &patch.phone_number {
                values.push(Box::new(phone_number.clone()));
                assignments.push(format!("phone_number = ?{}", values.len()));
            }

            values.push(Box::new(id));
            let sql = format!("UPDATE users SET {} WHERE id = ?{}", assignments.join(", "), values.len());
            self.conn.execute(&sql, params_from_iter(values.iter()))?;
        }

        self.get(id)
    }

    /// Removes a user. Returns whether a row existed. Tasks referencing the
    /// user are left in place.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let affected = self.conn.execute(DELETE_USER, params![id])?;
        Ok(affected > 0)
    }
}
