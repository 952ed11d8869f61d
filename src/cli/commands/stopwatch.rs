use super::{audit, open_session};
use crate::cli::parser::{Commands, StopwatchAction};
use crate::config::Config;
use crate::core::stopwatch::elapsed_at;
use crate::core::store::{Effect, WidgetOp};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::render;
use crate::utils::time::format_elapsed;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stopwatch { id, action } = cmd {
        let mut session = open_session(cfg)?;

        let op = match action {
            StopwatchAction::Start => WidgetOp::Start,
            StopwatchAction::Stop => WidgetOp::Stop,
            StopwatchAction::Reset => WidgetOp::ResetStopwatch,
            StopwatchAction::Lap => WidgetOp::Lap,
            StopwatchAction::Show => {
                let record = session
                    .widget(id)
                    .ok_or_else(|| AppError::WidgetNotFound(id.clone()))?;
                println!("{}", render::widget_value(record, session.now_ms()));
                print!("{}", render::laps(record));
                return Ok(());
            }
        };

        let effect = session.apply(id, op)?;

        let elapsed = session
            .widget(id)
            .and_then(|w| w.stopwatch())
            .map(|sw| elapsed_at(sw, session.now_ms()))
            .unwrap_or_default();
        let shown = format_elapsed(elapsed);

        match (action, effect) {
            (StopwatchAction::Start, Effect::Unchanged) => info("Stopwatch is already running."),
            (StopwatchAction::Stop, Effect::Unchanged) => info("Stopwatch is already stopped."),
            (StopwatchAction::Lap, Effect::Unchanged) => {
                info("Laps can only be taken while the stopwatch is running.")
            }
            _ => {
                audit(&session, "stopwatch", id, &format!("{:?} at {}", action, shown));
                success(format!("Stopwatch {}: {:?} ({})", id, action, shown));
            }
        }
    }

    Ok(())
}
