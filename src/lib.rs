//! # Taskrec - Task record keeper
//!
//! A command-line utility for keeping records of users and their tasks.
//!
//! ## Features
//!
//! - **User Directory**: Create, list, update and delete users with unique emails
//! - **Task Records**: Idempotent task creation keyed on a client-supplied token
//! - **Filtered Listings**: Combine status and owner predicates, order by due
//!   date, paginate with skip/limit
//! - **Status Summary**: Per-status task counts in a single grouped query
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskrec::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
