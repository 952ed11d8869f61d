use super::phase_source;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::providers::load_phases;
use crate::errors::AppResult;
use crate::ui::render;
use crate::utils::time::parse_instant;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Moon { date, json } = cmd {
        let at = match date {
            Some(s) => parse_instant(s)?,
            None => Utc::now(),
        };

        let calculator = cfg.moon_calculator()?;
        let phases = load_phases(phase_source(cfg).as_ref()).into_inner();
        let reading = calculator.calculate(at, &phases)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&reading)?);
        } else {
            println!("{}", render::moon_line(&reading));
        }
    }

    Ok(())
}
