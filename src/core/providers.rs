//! External collaborators: phase tables, weather and widget prompts.
//!
//! A provider failure never reaches the user as an error. `load_*` helpers
//! turn it into [`Fetched::Fallback`] carrying placeholder data, and the
//! caller consumes either outcome the same way.

use crate::core::moon::{default_phases, fallback_phases};
use crate::errors::{AppError, AppResult};
use crate::models::moon::{PhaseRange, PhaseTable};
use crate::models::tiles::WeatherTile;
use crate::models::widget_kind::WidgetKind;
use crate::ui::messages::warning;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Outcome of a provider call: real data, or the substitute used after a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Fallback(T),
}

impl<T> Fetched<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(v) | Fetched::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(v) | Fetched::Fallback(v) => v,
        }
    }
}

pub trait PhaseTableSource {
    fn fetch_phases(&self) -> AppResult<PhaseTable>;
}

pub trait WeatherSource {
    fn fetch_weather(&self, location: &str) -> AppResult<WeatherTile>;
}

/// What the user picked when adding a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRequest {
    pub kind: WidgetKind,
    pub title: String,
    pub content: Option<String>,
}

pub trait WidgetPrompt {
    /// `None` means the user cancelled.
    fn ask(&mut self) -> Option<WidgetRequest>;
}

/// Fetch the phase table, substituting the minimal built-in table on failure.
pub fn load_phases(source: &dyn PhaseTableSource) -> Fetched<Vec<PhaseRange>> {
    match source.fetch_phases() {
        Ok(table) if !table.moon_phases.is_empty() => Fetched::Live(table.moon_phases),
        Ok(_) => {
            warning("Phase table is empty, using the built-in fallback table.");
            Fetched::Fallback(fallback_phases())
        }
        Err(e) => {
            warning(format!("Could not load the phase table ({}), using fallback.", e));
            Fetched::Fallback(fallback_phases())
        }
    }
}

/// Fetch the weather, substituting the "No data" placeholder on failure.
pub fn load_weather(source: &dyn WeatherSource, location: &str) -> Fetched<WeatherTile> {
    match source.fetch_weather(location) {
        Ok(tile) => Fetched::Live(tile),
        Err(e) => {
            warning(format!("Weather for {} unavailable: {}", location, e));
            Fetched::Fallback(WeatherTile::placeholder())
        }
    }
}

/// The complete eight-phase table compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinPhases;

impl PhaseTableSource for BuiltinPhases {
    fn fetch_phases(&self) -> AppResult<PhaseTable> {
        Ok(PhaseTable {
            moon_phases: default_phases(),
        })
    }
}

/// Weather source that is never reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableWeather;

impl WeatherSource for UnavailableWeather {
    fn fetch_weather(&self, location: &str) -> AppResult<WeatherTile> {
        Err(AppError::Provider(format!(
            "no weather source configured for {location}"
        )))
    }
}

/// JSON document on disk. For weather, a `{location}` placeholder in the
/// path is replaced by the requested location.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self, location: Option<&str>) -> AppResult<String> {
        let raw = self.path.to_string_lossy();
        let path = match location {
            Some(loc) => PathBuf::from(raw.replace("{location}", loc)),
            None => self.path.clone(),
        };
        fs::read_to_string(&path)
            .map_err(|e| AppError::Provider(format!("{}: {}", path.display(), e)))
    }
}

impl PhaseTableSource for JsonFileSource {
    fn fetch_phases(&self) -> AppResult<PhaseTable> {
        let raw = self.read(None)?;
        serde_json::from_str(&raw).map_err(|e| AppError::Provider(e.to_string()))
    }
}

impl WeatherSource for JsonFileSource {
    fn fetch_weather(&self, location: &str) -> AppResult<WeatherTile> {
        let raw = self.read(Some(location))?;
        let doc: Value = serde_json::from_str(&raw).map_err(|e| AppError::Provider(e.to_string()))?;
        parse_weather(&doc)
            .ok_or_else(|| AppError::Provider("unrecognized weather document".into()))
    }
}

/// Accept either `{temperature, description}` or the
/// `current_condition[0].temp_C / weatherDesc[0].value` report shape.
fn parse_weather(doc: &Value) -> Option<WeatherTile> {
    if let (Some(t), Some(d)) = (
        doc.get("temperature").and_then(Value::as_str),
        doc.get("description").and_then(Value::as_str),
    ) {
        return Some(WeatherTile {
            temperature: t.to_string(),
            description: d.to_string(),
        });
    }

    let current = doc.get("current_condition")?.get(0)?;
    let temp = match current.get("temp_C")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let description = current
        .get("weatherDesc")?
        .get(0)?
        .get("value")?
        .as_str()?
        .to_string();

    Some(WeatherTile {
        temperature: format!("{}°C", temp),
        description,
    })
}

/// Prompt answered up front (e.g. from command-line arguments).
#[derive(Debug, Clone)]
pub struct FixedPrompt(Option<WidgetRequest>);

impl FixedPrompt {
    pub fn new(request: Option<WidgetRequest>) -> Self {
        Self(request)
    }
}

impl WidgetPrompt for FixedPrompt {
    fn ask(&mut self) -> Option<WidgetRequest> {
        self.0.take()
    }
}
