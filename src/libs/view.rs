//! Terminal table rendering for listings and the status summary.

use crate::libs::task::{Task, TaskSummary};
use crate::libs::user::User;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn users(users: &[User]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "PHONE"]);
        for user in users {
            table.add_row(row![user.id, user.name, user.email, user.phone_number.as_deref().unwrap_or("-")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "STATUS", "DUE DATE", "USER", "UPDATED"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.status,
                task.due_date.format("%Y-%m-%d %H:%M"),
                task.user_id,
                task.updated_at.format("%Y-%m-%d %H:%M")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &TaskSummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["STATUS", "COUNT"]);
        table.add_row(row!["pending", summary.pending]);
        table.add_row(row!["in_progress", summary.in_progress]);
        table.add_row(row!["done", summary.done]);
        table.add_row(row!["total", summary.total()]);
        table.printstd();

        Ok(())
    }
}
