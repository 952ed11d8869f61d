use super::{open_session, phase_source, weather_source};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::ui::render;
use std::thread;
use std::time::Duration;

/// Run the live dashboard for a fixed time, printing once per clock tick.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { seconds } = cmd {
        let mut session = open_session(cfg)?;
        session.refresh_weather(weather_source(cfg).as_ref());
        session.refresh_moon(phase_source(cfg).as_ref())?;

        header("Dashboard (live)");
        println!("{}", render::tiles(session.tiles()));

        let duration_ms = i64::try_from(seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        let summary = session.run_for(
            duration_ms,
            |ms| thread::sleep(Duration::from_millis(u64::try_from(ms).unwrap_or(0))),
            |s| {
                let running: Vec<String> = s
                    .widgets()
                    .iter()
                    .filter(|w| w.is_running_stopwatch())
                    .map(|w| format!("{} {}", w.title, render::widget_value(w, s.now_ms())))
                    .collect();
                println!("🕒 {}  {}", s.tiles().clock.time, running.join(" | "));
            },
        );

        info(format!("Stopped {} timer(s).", summary.cancelled));
    }

    Ok(())
}
