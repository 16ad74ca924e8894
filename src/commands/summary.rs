use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;

pub fn cmd(config: &Config) -> Result<()> {
    let summary = Tasks::new(config)?.summary()?;

    msg_print!(Message::SummaryHeader, true);
    View::summary(&summary)?;
    Ok(())
}
