use super::weather_source;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::providers::load_weather;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Weather) {
        let tile = load_weather(weather_source(cfg).as_ref(), &cfg.weather_location).into_inner();
        println!(
            "🌤️  {}: {} {}",
            cfg.weather_location, tile.temperature, tile.description
        );
    }

    Ok(())
}
