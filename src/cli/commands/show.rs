use super::{open_session, phase_source, weather_source};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Show) {
        let mut session = open_session(cfg)?;
        session.refresh_weather(weather_source(cfg).as_ref());
        session.refresh_moon(phase_source(cfg).as_ref())?;

        header("Dashboard");
        println!("{}", render::tiles(session.tiles()));
        if !session.widgets().is_empty() {
            print!("{}", render::widgets(session.widgets(), session.now_ms()));
        }
    }

    Ok(())
}
