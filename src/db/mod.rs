//! SQLite persistence layer.
//!
//! Two concrete stores over one table pair. Both follow the same small
//! contract: point lookup by id returns `Option`, listings take skip/limit,
//! insert and update commit before returning and hand back the fully
//! refreshed row, delete reports whether a row existed. Absence is never an
//! error; the caller decides whether it is.

/// Database connection handle and file resolution.
pub mod db;

/// Versioned schema migration system.
pub mod migrations;

/// Task store: filtered/ordered/paginated reads, idempotent creation,
/// partial updates and the status summary.
pub mod tasks;

/// User directory: CRUD over users with unique-email backing.
pub mod users;
