use crate::db::tasks::Tasks;
use crate::db::users::Users;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::task::{parse_due_date, NewTask, TaskFilter, TaskOrder, TaskPatch, TaskStatus};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Due date: ISO 8601 timestamp (offset is stripped) or YYYY-MM-DD
        due: String,
        /// Id of the owning user
        #[arg(long)]
        user: String,
        /// Initial status (pending, in_progress, done); defaults to pending
        #[arg(short, long)]
        status: Option<String>,
        /// Idempotency key: repeated submissions with the same key return
        /// the original record
        #[arg(short = 'k', long)]
        idempotency_key: Option<String>,
    },
    /// List tasks with optional filters
    List {
        /// Only tasks with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Only tasks owned by this user id
        #[arg(long)]
        user: Option<String>,
        /// Ordering: due_date_asc (default) or due_date_desc
        #[arg(long, default_value = "due_date_asc")]
        order_by: String,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Show a single task
    Get {
        /// Task id
        id: String,
    },
    /// Update fields of a task; omitted fields are left untouched
    Update {
        /// Task id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
        /// New due date
        #[arg(long)]
        due: Option<String>,
        /// New idempotency key; pass an empty string to clear it
        #[arg(short = 'k', long)]
        idempotency_key: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: TaskArgs, config: &Config) -> Result<()> {
    match args.command {
        TaskCommand::Create {
            title,
            due,
            user,
            status,
            idempotency_key,
        } => handle_create(title, due, user, status, idempotency_key, config),
        TaskCommand::List {
            status,
            user,
            order_by,
            skip,
            limit,
        } => handle_list(status, user, order_by, skip, limit, config),
        TaskCommand::Get { id } => handle_get(id, config),
        TaskCommand::Update {
            id,
            title,
            status,
            due,
            idempotency_key,
        } => handle_update(id, title, status, due, idempotency_key, config),
        TaskCommand::Delete { id, yes } => handle_delete(id, yes, config),
    }
}

fn parse_id(input: &str) -> Option<Uuid> {
    match Uuid::parse_str(input) {
        Ok(id) => Some(id),
        Err(_) => {
            msg_error!(Message::InvalidId(input.to_string()));
            None
        }
    }
}

fn parse_status(input: &str) -> Option<TaskStatus> {
    match input.parse::<TaskStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            msg_error!(Message::InvalidStatus(input.to_string()));
            None
        }
    }
}

fn parse_due(input: &str) -> Option<NaiveDateTime> {
    match parse_due_date(input) {
        Ok(due) => Some(due),
        Err(_) => {
            msg_error!(Message::InvalidDueDate(input.to_string()));
            None
        }
    }
}

fn handle_create(
    title: String,
    due: String,
    user: String,
    status: Option<String>,
    idempotency_key: Option<String>,
    config: &Config,
) -> Result<()> {
    if title.trim().is_empty() {
        msg_error!(Message::EmptyTaskTitle);
        return Ok(());
    }
    let Some(user_id) = parse_id(&user) else { return Ok(()) };
    let Some(due_date) = parse_due(&due) else { return Ok(()) };
    let status = match status {
        Some(s) => match parse_status(&s) {
            Some(status) => Some(status),
            None => return Ok(()),
        },
        None => None,
    };

    // The task store does not re-validate the owner; the surface does
    if Users::new(config)?.get(user_id)?.is_none() {
        msg_error!(Message::UserNotFound(user_id.to_string()));
        return Ok(());
    }

    let new = NewTask {
        title,
        status,
        due_date,
        idempotency_key: idempotency_key.clone(),
        user_id,
    };

    let mut tasks_db = Tasks::new(config)?;
    let replayed = match &idempotency_key {
        Some(key) => tasks_db.get_by_idempotency_key(key)?.is_some(),
        None => false,
    };
    match tasks_db.insert(&new) {
        Ok(task) => {
            if replayed {
                // insert() handed back the earlier record for the same key
                msg_info!(Message::TaskAlreadyRecorded(idempotency_key.unwrap_or_default()));
            } else {
                msg_success!(Message::TaskCreated(task.id.to_string()));
            }
            View::tasks(&[task])?;
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            // Lost a concurrent race on the same idempotency key
            msg_error!(Message::DuplicateSubmission(e.to_string()));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_list(status: Option<String>, user: Option<String>, order_by: String, skip: u32, limit: u32, config: &Config) -> Result<()> {
    let status = match status {
        Some(s) => match parse_status(&s) {
            Some(status) => Some(status),
            None => return Ok(()),
        },
        None => None,
    };
    let user_id = match user {
        Some(u) => match parse_id(&u) {
            Some(id) => Some(id),
            None => return Ok(()),
        },
        None => None,
    };
    let order = match order_by.parse::<TaskOrder>() {
        Ok(order) => order,
        Err(_) => {
            msg_error!(Message::InvalidOrderBy(order_by));
            return Ok(());
        }
    };

    let filter = TaskFilter {
        status,
        user_id,
        order,
        skip,
        limit,
    };
    let tasks = Tasks::new(config)?.fetch_filtered(&filter)?;

    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TaskListHeader, true);
    View::tasks(&tasks)?;
    Ok(())
}

fn handle_get(id: String, config: &Config) -> Result<()> {
    let Some(id) = parse_id(&id) else { return Ok(()) };

    match Tasks::new(config)?.get(id)? {
        Some(task) => View::tasks(&[task]),
        None => {
            msg_error!(Message::TaskNotFound(id.to_string()));
            Ok(())
        }
    }
}

fn handle_update(
    id: String,
    title: Option<String>,
    status: Option<String>,
    due: Option<String>,
    idempotency_key: Option<String>,
    config: &Config,
) -> Result<()> {
    let Some(id) = parse_id(&id) else { return Ok(()) };

    if let Some(title) = &title {
        if title.trim().is_empty() {
            msg_error!(Message::EmptyTaskTitle);
            return Ok(());
        }
    }
    let status = match status {
        Some(s) => match parse_status(&s) {
            Some(status) => Some(status),
            None => return Ok(()),
        },
        None => None,
    };
    let due_date = match due {
        Some(d) => match parse_due(&d) {
            Some(due) => Some(due),
            None => return Ok(()),
        },
        None => None,
    };

    // An empty --idempotency-key means "explicitly cleared"
    let idempotency_key = idempotency_key.map(|k| if k.is_empty() { None } else { Some(k) });

    let patch = TaskPatch {
        title,
        status,
        due_date,
        idempotency_key,
    };
    if patch.is_empty() {
        msg_info!(Message::NoFieldsToUpdate);
        return Ok(());
    }

    let mut tasks_db = Tasks::new(config)?;
    match tasks_db.update(id, &patch) {
        Ok(Some(task)) => {
            msg_success!(Message::TaskUpdated(task.id.to_string()));
            View::tasks(&[task])?;
            Ok(())
        }
        Ok(None) => {
            msg_error!(Message::TaskNotFound(id.to_string()));
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            msg_error!(Message::DuplicateSubmission(e.to_string()));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_delete(id: String, yes: bool, config: &Config) -> Result<()> {
    let Some(id) = parse_id(&id) else { return Ok(()) };

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(id.to_string()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    if Tasks::new(config)?.delete(id)? {
        msg_success!(Message::TaskDeleted(id.to_string()));
    } else {
        msg_error!(Message::TaskNotFound(id.to_string()));
    }
    Ok(())
}
