use super::{audit, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::WidgetOp;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Note { id, content } = cmd {
        let mut session = open_session(cfg)?;
        session.apply(id, WidgetOp::SetContent(content.clone()))?;

        audit(&session, "note", id, "Content updated");
        success(format!("Widget {} updated.", id));
    }

    Ok(())
}
