//! Built-in dashboard tiles (weather, clock, moon).

use super::moon::MoonReading;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

pub const WEATHER_NO_DATA: &str = "No data";
pub const WEATHER_LOAD_ERROR: &str = "Load error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherTile {
    pub temperature: String,
    pub description: String,
}

impl WeatherTile {
    /// Placeholder shown when the weather provider fails.
    pub fn placeholder() -> Self {
        Self {
            temperature: WEATHER_NO_DATA.to_string(),
            description: WEATHER_LOAD_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockTile {
    pub time: String, // HH:MM:SS, local time
    pub date: String, // YYYY-MM-DD, local date
}

impl ClockTile {
    pub fn at(now: DateTime<Utc>) -> Self {
        let local = now.with_timezone(&Local);
        Self {
            time: local.format("%H:%M:%S").to_string(),
            date: local.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tiles {
    pub weather: WeatherTile,
    pub clock: ClockTile,
    pub moon: Option<MoonReading>,
}
