//! Database connection handle.
//!
//! Opens the SQLite file named by the configuration (or the default file in
//! the application data directory) and brings the schema up to date. Each
//! store acquires its own handle for the duration of its work; nothing here
//! is shared process-wide.

use crate::db::migrations;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "taskrec.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database chosen by `config` and applies pending migrations.
    pub fn new(config: &Config) -> Result<Db> {
        let db_file_path = match &config.db_file {
            Some(path) => path.clone(),
            None => DataStorage::new().get_path(DB_FILE_NAME)?,
        };
        let mut conn = Connection::open(db_file_path)?;
        migrations::init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
