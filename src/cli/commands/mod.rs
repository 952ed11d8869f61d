//! Subcommand handlers and the helpers they share to open a session.

pub mod add;
pub mod config;
pub mod counter;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod moon;
pub mod note;
pub mod show;
pub mod stopwatch;
pub mod watch;
pub mod weather;

use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::providers::{
    BuiltinPhases, JsonFileSource, PhaseTableSource, UnavailableWeather, WeatherSource,
};
use crate::core::session::Dashboard;
use crate::core::store::WidgetStore;
use crate::db::initialize::init_db;
use crate::db::kv::SqliteSlot;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

pub type CliDashboard = Dashboard<SqliteSlot, SystemClock>;

/// Open the database, load the widgets and start a session on the system clock.
pub fn open_session(cfg: &Config) -> AppResult<CliDashboard> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    let store = WidgetStore::open(SqliteSlot::new(pool), &cfg.storage_key);
    Ok(Dashboard::open(
        store,
        SystemClock,
        cfg.moon_calculator()?,
        cfg.session_settings(),
    ))
}

pub fn phase_source(cfg: &Config) -> Box<dyn PhaseTableSource> {
    match &cfg.phase_table {
        Some(path) => Box::new(JsonFileSource::new(expand_tilde(path))),
        None => Box::new(BuiltinPhases),
    }
}

pub fn weather_source(cfg: &Config) -> Box<dyn WeatherSource> {
    match &cfg.weather_file {
        Some(path) => Box::new(JsonFileSource::new(expand_tilde(path))),
        None => Box::new(UnavailableWeather),
    }
}

/// Write an audit line; failures only produce a warning.
pub fn audit(session: &CliDashboard, operation: &str, target: &str, message: &str) {
    if let Err(e) = write_log(&session.slot().pool().conn, operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
