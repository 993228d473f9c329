//! Output formatting helpers.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print pre-formatted JSON text.
pub fn json_text(text: &str) {
    println!("{}", text);
}

/// Colour a status by its usual meaning.
pub fn status(value: &str) -> ColoredString {
    match value.to_lowercase().as_str() {
        "paid" | "success" | "completed" | "approved" | "active" => value.green(),
        "failed" | "rejected" | "cancelled" | "canceled" | "expired" | "inactive" => value.red(),
        "pending" | "processing" => value.yellow(),
        _ => value.normal(),
    }
}

/// A plain-text table with left-aligned columns.
///
/// Cell styling is applied after padding so that escape codes do not
/// disturb the alignment.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render rows as lines; `style` may restyle a padded cell by column.
    pub fn render<F>(&self, style: F) -> Vec<String>
    where
        F: Fn(usize, String) -> String,
    {
        let widths = self.widths();
        let pad = |cell: &str, width: usize| {
            let fill = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(fill))
        };

        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w).bold().to_string())
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![header.trim_end().to_string()];
        for row in &self.rows {
            let line = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| style(i, pad(cell, *w)))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }

    pub fn print<F>(&self, style: F)
    where
        F: Fn(usize, String) -> String,
    {
        for line in self.render(style) {
            println!("{}", line);
        }
    }
}
