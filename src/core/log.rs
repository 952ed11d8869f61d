use crate::db::log::{LogRow, read_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::text::{display_width, truncate_to_width};
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// Colour of the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "counter" | "note" => Colour::Yellow,
        "stopwatch" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = read_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| display_width(&e.operation) + display_width(&e.target) + 3)
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for LogRow {
            id,
            date,
            operation,
            target,
            message,
        } in entries
        {
            let plain = if target.is_empty() {
                operation.clone()
            } else {
                format!("{operation} ({target})")
            };
            let visible = truncate_to_width(&plain, MAX_OP_WIDTH, "...");
            let padding = " ".repeat(op_w.saturating_sub(display_width(&visible)));

            // only the operation word is coloured
            let color = color_for_operation(&operation);
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
