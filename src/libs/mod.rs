//! Shared domain types and application infrastructure.

/// Application configuration loaded once at startup.
pub mod config;

/// Platform application-data directory resolution.
pub mod data_storage;

/// Storage error taxonomy shared by both stores.
pub mod error;

/// User-facing message catalog and output macros.
pub mod messages;

/// Task records, patches, filters and the status summary.
pub mod task;

/// User records, patches and email validation.
pub mod user;

/// Terminal table rendering.
pub mod view;
