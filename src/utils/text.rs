//! Terminal display width of strings (wide glyphs such as emoji count as two columns).

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` so it occupies at most `max` columns, ending with `marker` when shortened.
pub fn truncate_to_width(s: &str, max: usize, marker: &str) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }

    let budget = max.saturating_sub(display_width(marker));
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(marker);
    out
}

/// Truncate then right-pad with spaces to exactly `width` columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width, "…");
    let pad = width.saturating_sub(display_width(&cut));
    format!("{}{}", cut, " ".repeat(pad))
}
