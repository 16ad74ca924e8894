//! Command-line surface.
//!
//! The commands translate already-parsed input into store calls and map the
//! outcomes to user-facing messages: absence becomes a "not found" error
//! message, a uniqueness conflict becomes an "already exists" one, and
//! malformed enumeration or ordering tokens are rejected here before any
//! store is touched.

pub mod init;
pub mod migrations;
pub mod summary;
pub mod task;
pub mod user;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Manage users")]
    User(user::UserArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Show task counts by status")]
    Summary,
    #[command(about = "Show database schema version and history")]
    Migrations,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> anyhow::Result<()> {
        if crate::libs::messages::macros::is_debug_mode() {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
        }

        let cli = Self::parse();
        let config = crate::libs::config::Config::read()?;

        match cli.command {
            Commands::Init => init::cmd(),
            Commands::User(args) => user::cmd(args, &config),
            Commands::Task(args) => task::cmd(args, &config),
            Commands::Summary => summary::cmd(&config),
            Commands::Migrations => migrations::cmd(&config),
        }
    }
}
