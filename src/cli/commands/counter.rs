use super::{audit, open_session};
use crate::cli::parser::{Commands, CounterAction};
use crate::config::Config;
use crate::core::store::WidgetOp;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Counter { id, action } = cmd {
        let op = match action {
            CounterAction::Inc => WidgetOp::Increment,
            CounterAction::Dec => WidgetOp::Decrement,
            CounterAction::Reset => WidgetOp::ResetCounter,
        };

        let mut session = open_session(cfg)?;
        session.apply(id, op)?;

        let value = session
            .widget(id)
            .and_then(|w| w.counter())
            .map(|c| c.value)
            .unwrap_or_default();

        audit(&session, "counter", id, &format!("{:?} -> {}", action, value));
        success(format!("Counter {} = {}", id, value));
    }

    Ok(())
}
