//! Fixed-width text tables for the widget list.

use super::text::pad_to_width;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn line<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(cells.chain(std::iter::repeat("")))
            .map(|(col, cell)| pad_to_width(cell, col.width))
            .collect();
        format!("{}\n", parts.join(" ").trim_end())
    }

    pub fn render(&self) -> String {
        let mut out = self.line(self.columns.iter().map(|c| c.header.as_str()));
        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&self.line(row.iter().map(String::as_str)));
        }
        out
    }
}
