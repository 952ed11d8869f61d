#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use rdashboard::core::store::WidgetStore;
use rdashboard::db::kv::{SqliteSlot, WIDGETS_KEY};
use rdashboard::db::pool::DbPool;
use rdashboard::models::widget::WidgetRecord;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Command with its config directory isolated under the temp dir.
pub fn rdb(name: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rdashboard");
    cmd.env("RDASHBOARD_HOME", test_home(name));
    cmd
}

pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdashboard_home", name));
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdashboard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh database initialized through the CLI (`--test init`).
pub fn init_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    rdb(name)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// Read the persisted widget collection straight from the database.
pub fn stored_widgets(db_path: &str) -> Vec<WidgetRecord> {
    let pool = DbPool::new(db_path).expect("open db");
    let store = WidgetStore::open(SqliteSlot::new(pool), WIDGETS_KEY);
    store.records().to_vec()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .expect("valid timestamp")
}
