//! Plain-text rendering of tiles and widgets for the terminal.

use crate::core::stopwatch::elapsed_at;
use crate::models::moon::MoonReading;
use crate::models::tiles::Tiles;
use crate::models::widget::{WidgetData, WidgetRecord};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_elapsed;

pub fn moon_line(reading: &MoonReading) -> String {
    format!(
        "{} {} ({}) - {}",
        reading.emoji,
        reading.phase_name,
        reading.age_label(),
        reading.description
    )
}

pub fn tiles(tiles: &Tiles) -> String {
    let moon = tiles
        .moon
        .as_ref()
        .map(moon_line)
        .unwrap_or_else(|| "Loading".to_string());

    format!(
        "🌤️  Weather : {} {}\n🕒 Time    : {} {}\n🌙 Moon    : {}\n",
        tiles.weather.temperature,
        tiles.weather.description,
        tiles.clock.date,
        tiles.clock.time,
        moon
    )
}

/// One-line summary of the widget's state, as seen at `now_ms`.
pub fn widget_value(record: &WidgetRecord, now_ms: i64) -> String {
    match &record.data {
        WidgetData::Counter(c) => c.value.to_string(),
        WidgetData::Notes(t) | WidgetData::Basic(t) => t.content.lines().next().unwrap_or("").to_string(),
        WidgetData::Stopwatch(sw) => {
            let state = if sw.is_running { "running" } else { "stopped" };
            format!(
                "{} ({}, {} laps)",
                format_elapsed(elapsed_at(sw, now_ms)),
                state,
                sw.laps.len()
            )
        }
    }
}

pub fn widgets(records: &[WidgetRecord], now_ms: i64) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 14),
        Column::new("TYPE", 10),
        Column::new("TITLE", 20),
        Column::new("VALUE", 30),
    ]);

    for r in records {
        table.add_row(vec![
            r.id.clone(),
            r.kind().as_str().to_string(),
            r.title.clone(),
            widget_value(r, now_ms),
        ]);
    }

    table.render()
}

/// Lap list of a stopwatch, newest first.
pub fn laps(record: &WidgetRecord) -> String {
    let Some(sw) = record.stopwatch() else {
        return String::new();
    };

    let mut out = String::new();
    for lap in &sw.laps {
        out.push_str(&format!("  #{:<3} {}\n", lap.number, lap.formatted_time));
    }
    out
}
