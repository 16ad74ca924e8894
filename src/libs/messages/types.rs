#[derive(Debug, Clone)]
pub enum Message {
    // === USER MESSAGES ===
    UserCreated(String),          // email
    UserUpdated(String),          // id
    UserDeleted(String),          // id
    UserNotFound(String),         // id or email
    EmailAlreadyRegistered(String),
    InvalidEmail(String),
    EmptyUserName,
    NoUsersFound,
    UserListHeader,
    UserTasksHeader(String), // user id

    // === TASK MESSAGES ===
    TaskCreated(String),          // id
    TaskAlreadyRecorded(String),  // idempotency key
    TaskUpdated(String),          // id
    TaskDeleted(String),          // id
    TaskNotFound(String),         // id
    EmptyTaskTitle,
    NoTasksFound,
    TaskListHeader,
    ConfirmDeleteTask(String),    // id
    ConfirmDeleteUser(String),    // id
    NoFieldsToUpdate,
    SummaryHeader,

    // === VALIDATION MESSAGES ===
    InvalidStatus(String),
    InvalidOrderBy(String),
    InvalidDueDate(String),
    InvalidId(String),
    DuplicateSubmission(String), // conflicting unique value

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    PromptDbFile,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DbVersion(u32),
    MigrationHistoryHeader,

    // === GENERIC MESSAGES ===
    OperationCancelled,
}
