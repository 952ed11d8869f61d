//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid phase table: {0}")]
    InvalidPhaseTable(String),

    #[error("Invalid lunar cycle length: {0} (must be a positive number of days)")]
    InvalidCycleLength(f64),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid widget type: {0}")]
    InvalidWidgetType(String),

    // ---------------------------
    // Widget logic errors
    // ---------------------------
    #[error("No widget found with id {0}")]
    WidgetNotFound(String),

    #[error("Widget {id} is a {actual} widget, operation requires {expected}")]
    WrongWidgetType {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },

    // ---------------------------
    // External providers
    // ---------------------------
    #[error("Provider error: {0}")]
    Provider(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,
}

pub type AppResult<T> = Result<T, AppError>;
