//! User-facing status lines (icon + colour), printed by CLI handlers and by
//! the core when it degrades to a fallback.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";

fn icon(colour: Colour, icon: &str) -> String {
    Style::new().bold().fg(colour).paint(icon).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Blue, ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Green, ICON_OK), msg);
}

/// Warnings go to stderr so they never mix with machine-readable output.
pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", icon(Colour::Yellow, ICON_WARN), msg);
}

pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}\n",
        Style::new()
            .bold()
            .fg(Colour::Blue)
            .paint(format!("====================== {}", msg))
    );
}
