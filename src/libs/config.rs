//! Application configuration.
//!
//! A single JSON file in the application data directory. The configuration
//! is read once at startup and passed by reference to whichever component
//! opens the store; there is no process-wide settings singleton.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Explicit database file path. When unset, the database lives in the
    /// application data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_file: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration file, falling back to defaults when it does
    /// not exist yet.
    pub fn read() -> Result<Self> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let file = File::open(&config_path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        fs::write(&config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Interactive setup: prompts for the database file location and writes
    /// the configuration file.
    pub fn init() -> Result<Self> {
        let current = Config::read()?;
        let default_path = current.db_file.as_ref().map(|p| p.display().to_string()).unwrap_or_default();

        let db_file: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDbFile.to_string())
            .default(default_path)
            .allow_empty(true)
            .interact_text()?;

        let config = Config {
            db_file: if db_file.is_empty() { None } else { Some(PathBuf::from(db_file)) },
        };
        config.save()?;
        msg_success!(Message::ConfigSaved);

        Ok(config)
    }
}
