use rdashboard::utils::table::{Column, Table};
use rdashboard::utils::text::{display_width, truncate_to_width};

fn widget_table(rows: &[[&str; 3]]) -> Vec<String> {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("TITLE", 10),
        Column::new("VALUE", 5),
    ]);
    for row in rows {
        table.add_row(row.iter().map(|c| c.to_string()).collect());
    }
    table.render().lines().map(str::to_string).collect()
}

#[test]
fn test_wide_titles_keep_columns_aligned() {
    let lines = widget_table(&[["1", "☕ Coffee", "12345"], ["2", "Tea", "67890"]]);

    // header, separator, two rows
    assert_eq!(lines.len(), 4);
    assert_eq!(display_width(&lines[2]), display_width(&lines[3]));
    assert_eq!(display_width(&lines[2]), 4 + 1 + 10 + 1 + 5);
}

#[test]
fn test_overlong_wide_title_is_cut_to_column_width() {
    let lines = widget_table(&[["1", "🌕🌕🌕🌕🌕🌕🌕", "1"], ["2", "plain", "2"]]);

    assert!(lines[2].contains('…'));
    let value_col = |line: &str| {
        let title_end = line.rfind(' ').expect("separator");
        display_width(&line[..title_end])
    };
    assert_eq!(value_col(&lines[2]), value_col(&lines[3]));
}

#[test]
fn test_truncate_counts_display_columns() {
    assert_eq!(truncate_to_width("short", 10, "..."), "short");
    assert_eq!(truncate_to_width("abcdefghij", 6, "..."), "abc...");

    let cut = truncate_to_width("🌕🌕🌕🌕", 5, "…");
    assert_eq!(cut, "🌕🌕…");
    assert_eq!(display_width(&cut), 5);
}
