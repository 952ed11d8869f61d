use super::{audit, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        let mut session = open_session(cfg)?;

        let title = session
            .widget(id)
            .map(|w| w.title.clone())
            .ok_or_else(|| AppError::WidgetNotFound(id.clone()))?;

        let prompt = format!("Delete widget '{}' ({})? This action is irreversible.", title, id);
        if !*force && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        if let Some(removed) = session.remove_widget(id)? {
            audit(
                &session,
                "del",
                &removed.id,
                &format!("Deleted {} widget '{}'", removed.kind().as_str(), removed.title),
            );
            success(format!("Widget '{}' has been deleted.", removed.title));
        }
    }

    Ok(())
}
