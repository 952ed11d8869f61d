use crate::core::moon::{DEFAULT_LUNAR_CYCLE_DAYS, DEFAULT_REFERENCE_NEW_MOON, MoonCalculator};
use crate::core::session::SessionSettings;
use crate::core::timer::{DEFAULT_CLOCK_INTERVAL_MS, DEFAULT_STOPWATCH_INTERVAL_MS};
use crate::db::kv::WIDGETS_KEY;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "RDASHBOARD_HOME";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_reference_new_moon")]
    pub reference_new_moon: String,
    #[serde(default = "default_lunar_cycle_days")]
    pub lunar_cycle_days: f64,
    /// JSON file `{ "moonPhases": [...] }`; the built-in table is used when unset.
    #[serde(default)]
    pub phase_table: Option<String>,
    /// Cached weather report; `{location}` is replaced by `weather_location`.
    #[serde(default)]
    pub weather_file: Option<String>,
    #[serde(default = "default_weather_location")]
    pub weather_location: String,
    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: i64,
    #[serde(default = "default_stopwatch_interval")]
    pub stopwatch_interval_ms: i64,
}

fn default_storage_key() -> String {
    WIDGETS_KEY.to_string()
}
fn default_reference_new_moon() -> String {
    DEFAULT_REFERENCE_NEW_MOON.to_string()
}
fn default_lunar_cycle_days() -> f64 {
    DEFAULT_LUNAR_CYCLE_DAYS
}
fn default_weather_location() -> String {
    "Moscow".to_string()
}
fn default_clock_interval() -> i64 {
    DEFAULT_CLOCK_INTERVAL_MS
}
fn default_stopwatch_interval() -> i64 {
    DEFAULT_STOPWATCH_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            storage_key: default_storage_key(),
            reference_new_moon: default_reference_new_moon(),
            lunar_cycle_days: default_lunar_cycle_days(),
            phase_table: None,
            weather_file: None,
            weather_location: default_weather_location(),
            clock_interval_ms: default_clock_interval(),
            stopwatch_interval_ms: default_stopwatch_interval(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV) {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rdashboard")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rdashboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rdashboard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rdashboard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn moon_calculator(&self) -> AppResult<MoonCalculator> {
        MoonCalculator::from_config(&self.reference_new_moon, self.lunar_cycle_days)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            clock_interval_ms: self.clock_interval_ms,
            stopwatch_interval_ms: self.stopwatch_interval_ms,
            weather_location: self.weather_location.clone(),
        }
    }

    /// Initialize configuration and database files. Returns the database path.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(db_path)
    }
}
