//! Human-readable text for every [`Message`] variant. All user-facing
//! wording lives here so commands never format strings inline.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === USER MESSAGES ===
            Message::UserCreated(email) => format!("User '{}' created", email),
            Message::UserUpdated(id) => format!("User {} updated", id),
            Message::UserDeleted(id) => format!("User {} deleted", id),
            Message::UserNotFound(id) => format!("User '{}' not found", id),
            Message::EmailAlreadyRegistered(email) => format!("Email '{}' is already registered", email),
            Message::InvalidEmail(email) => format!("'{}' is not a valid email address", email),
            Message::EmptyUserName => "User name must not be empty".to_string(),
            Message::NoUsersFound => "No users found".to_string(),
            Message::UserListHeader => "Users".to_string(),
            Message::UserTasksHeader(id) => format!("Tasks owned by user {}", id),

            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task {} created", id),
            Message::TaskAlreadyRecorded(key) => format!("Task with idempotency key '{}' already recorded, returning the original", key),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task '{}' not found", id),
            Message::EmptyTaskTitle => "Task title must not be empty".to_string(),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::TaskListHeader => "Tasks".to_string(),
            Message::ConfirmDeleteTask(id) => format!("Delete task {}?", id),
            Message::ConfirmDeleteUser(id) => format!("Delete user {}? Tasks referencing it are kept", id),
            Message::NoFieldsToUpdate => "No fields to update were provided".to_string(),
            Message::SummaryHeader => "Task counts by status".to_string(),

            // === VALIDATION MESSAGES ===
            Message::InvalidStatus(value) => format!("Invalid status '{}', expected pending, in_progress or done", value),
            Message::InvalidOrderBy(value) => format!("Invalid ordering '{}', expected due_date_asc or due_date_desc", value),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected an ISO 8601 timestamp or YYYY-MM-DD", value),
            Message::InvalidId(value) => format!("'{}' is not a valid identifier", value),
            Message::DuplicateSubmission(detail) => format!("Rejected as a duplicate: {}", detail),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::PromptDbFile => "Database file path (empty for the default location)".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Applying migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} applied", version),
            Message::MigrationFailed(version, err) => format!("Migration v{} failed: {}", version, err),
            Message::AllMigrationsCompleted => "Database schema is up to date".to_string(),
            Message::DbVersion(version) => format!("Database schema version: {}", version),
            Message::MigrationHistoryHeader => "Applied migrations".to_string(),

            // === GENERIC MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
