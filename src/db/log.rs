//! Audit trail of user mutations, kept in the `log` table.

use crate::errors::AppResult;
use chrono::{DateTime, Local};
use rusqlite::{Connection, params};

pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Append one line, stamped with the local time.
pub fn write_log(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached("INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)")?
        .execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}

/// Every line, oldest first. Dates that parse as RFC 3339 are normalized to
/// second precision.
pub fn read_log(conn: &Connection) -> AppResult<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        Ok(LogRow {
            id: row.get(0)?,
            date: DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date),
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
