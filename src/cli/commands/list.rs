use super::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::render;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::List) {
        let session = open_session(cfg)?;

        if session.widgets().is_empty() {
            info("No widgets yet. Add one with `rdashboard add <type>`.");
            return Ok(());
        }

        print!("{}", render::widgets(session.widgets(), session.now_ms()));
    }

    Ok(())
}
