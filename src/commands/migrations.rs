use crate::db::db::Db;
use crate::db::migrations::{get_db_version, MigrationManager};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd(config: &Config) -> Result<()> {
    // Opening the handle already brings the schema up to date.
    let db = Db::new(config)?;

    msg_info!(Message::DbVersion(get_db_version(&db.conn)?));

    let history = MigrationManager::new().get_migration_history(&db.conn)?;
    if !history.is_empty() {
        msg_print!(Message::MigrationHistoryHeader, true);
        for (version, name, applied_at) in history {
            println!("v{}: {} ({})", version, name, applied_at);
        }
    }
    Ok(())
}
