use crate::db::tasks::Tasks;
use crate::db::users::Users;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::user::{is_valid_email, NewUser, UserPatch};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create a new user
    Create {
        /// Display name
        name: String,
        /// Email address, unique across all users
        email: String,
        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// List users
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Show a single user by id or email
    Get {
        /// User id or email address
        user: String,
    },
    /// Update fields of a user; omitted fields are left untouched
    Update {
        /// User id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New phone number; pass an empty string to clear it
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a user; their tasks are kept
    Delete {
        /// User id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List tasks owned by a user
    Tasks {
        /// User id
        id: String,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
}

pub fn cmd(args: UserArgs, config: &Config) -> Result<()> {
    match args.command {
        UserCommand::Create { name, email, phone } => handle_create(name, email, phone, config),
        UserCommand::List { skip, limit } => handle_list(skip, limit, config),
        UserCommand::Get { user } => handle_get(user, config),
        UserCommand::Update { id, name, email, phone } => handle_update(id, name, email, phone, config),
        UserCommand::Delete { id, yes } => handle_delete(id, yes, config),
        UserCommand::Tasks { id, skip, limit } => handle_tasks(id, skip, limit, config),
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

fn handle_create(name: String, email: String, phone: Option<String>, config: &Config) -> Result<()> {
    if name.trim().is_empty() {
        msg_error!(Message::EmptyUserName);
        return Ok(());
    }
    if !is_valid_email(&email) {
        msg_error!(Message::InvalidEmail(email));
        return Ok(());
    }

    let mut users_db = Users::new(config)?;

    // Lookup-then-decide; the unique constraint remains the backstop
    if users_db.get_by_email(&email)?.is_some() {
        msg_error!(Message::EmailAlreadyRegistered(email));
        return Ok(());
    }

    let mut new = NewUser::new(&name, &email);
    new.phone_number = phone;

    match users_db.create(&new) {
        Ok(user) => {
            msg_success!(Message::UserCreated(user.email.clone()));
            View::users(&[user])?;
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            msg_error!(Message::EmailAlreadyRegistered(email));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_list(skip: u32, limit: u32, config: &Config) -> Result<()> {
    let users = Users::new(config)?.list(skip, limit)?;

    if users.is_empty() {
        msg_info!(Message::NoUsersFound);
        return Ok(());
    }

    msg_print!(Message::UserListHeader, true);
    View::users(&users)?;
    Ok(())
}

fn handle_get(identifier: String, config: &Config) -> Result<()> {
    let mut users_db = Users::new(config)?;

    let user = if let Ok(id) = Uuid::parse_str(&identifier) {
        users_db.get(id)?
    } else {
        users_db.get_by_email(&identifier)?
    };

    match user {
        Some(user) => View::users(&[user]),
        None => {
            msg_error!(Message::UserNotFound(identifier));
            Ok(())
        }
    }
}

fn handle_update(id: String, name: Option<String>, email: Option<String>, phone: Option<String>, config: &Config) -> Result<()> {
    let Some(id) = parse_id(&id) else { return Ok(()) };

    if let Some(name) = &name {
        if name.trim().is_empty() {
            msg_error!(Message::EmptyUserName);
            return Ok(());
        }
    }
    if let Some(email) = &email {
        if !is_valid_email(email) {
            msg_error!(Message::InvalidEmail(email.clone()));
            return Ok(());
        }
    }

    // An empty --phone means "explicitly cleared", absence means untouched
    let phone = phone.map(|p| if p.is_empty() { None } else { Some(p) });

    let patch = UserPatch {
        name,
        email: email.clone(),
        phone_number: phone,
    };
    if patch.is_empty() {
        msg_info!(Message::NoFieldsToUpdate);
        return Ok(());
    }

    let mut users_db = Users::new(config)?;
    match users_db.update(id, &patch) {
        Ok(Some(user)) => {
            msg_success!(Message::UserUpdated(user.id.to_string()));
            View::users(&[user])?;
            Ok(())
        }
        Ok(None) => {
            msg_error!(Message::UserNotFound(id.to_string()));
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            msg_error!(Message::EmailAlreadyRegistered(email.unwrap_or_default()));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_delete(id: String, yes: bool, config: &Config) -> Result<()> {
    let Some(id) = parse_id(&id) else { return Ok(()) };

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteUser(id.to_string()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    if Users::new(config)?.delete(id)? {
        msg_success!(Message::UserDeleted(id.to_string()));
    } else {
        msg_error!(Message::UserNotFound(id.to_string()));
    }
    Ok(())
}

fn handle_tasks(id: String, skip: u32, limit: u32, config: &Config) -> Result<()> {
    let Some(id) = parse_id(&id) else { return Ok(()) };

    if Users::new(config)?.get(id)?.is_none() {
        msg_error!(Message::UserNotFound(id.to_string()));
        return Ok(());
    }

    let tasks = Tasks::new(config)?.fetch_by_user(id, skip, limit)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::UserTasksHeader(id.to_string()), true);
    View::tasks(&tasks)?;
    Ok(())
}
