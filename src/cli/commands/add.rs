use super::{audit, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::providers::{FixedPrompt, WidgetRequest};
use crate::errors::{AppError, AppResult};
use crate::models::widget_kind::WidgetKind;
use crate::ui::messages::{info, success};

/// Add a widget. The command-line arguments play the role of the prompt.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        kind,
        title,
        content,
    } = cmd
    {
        let kind = WidgetKind::from_code(kind).ok_or_else(|| {
            AppError::InvalidWidgetType(format!(
                "'{}'. Use one of: notes, counter, stopwatch, basic",
                kind
            ))
        })?;

        if content.is_some() && !kind.accepts_content() {
            info(format!("--content is ignored for {} widgets.", kind.as_str()));
        }

        let mut prompt = FixedPrompt::new(Some(WidgetRequest {
            kind,
            title: title.clone().unwrap_or_default(),
            content: content.clone(),
        }));

        let mut session = open_session(cfg)?;
        if let Some(record) = session.add_widget(&mut prompt)? {
            audit(
                &session,
                "add",
                &record.id,
                &format!("Added {} widget '{}'", kind.as_str(), record.title),
            );
            success(format!(
                "Added {} widget '{}' with id {}",
                kind.as_str(),
                record.title,
                record.id
            ));
        }
    }

    Ok(())
}
