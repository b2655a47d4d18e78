//! Display rows for rendering results in the terminal or as JSON.

use serde::Serialize;

use crate::db::QueryResult;

/// Converts a result into ordered `(column, text)` pairs per row.
pub fn to_display_rows(result: &QueryResult) -> Vec<Vec<(String, String)>> {
    result
        .rows
        .iter()
        .map(|row| {
            result
                .columns
                .iter()
                .zip(row.iter())
                .map(|(col, value)| (col.name.clone(), value.to_display_string()))
                .collect()
        })
        .collect()
}

/// A result reduced to header names and text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    /// Column names in result order.
    pub columns: Vec<String>,

    /// Rendered cells, one inner vector per row; NULL is the empty string.
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    /// Builds the display table for a result.
    pub fn from_result(result: &QueryResult) -> Self {
        Self {
            columns: result.columns.iter().map(|c| c.name.clone()).collect(),
            rows: to_display_rows(result)
                .into_iter()
                .map(|row| row.into_iter().map(|(_, text)| text).collect())
                .collect(),
        }
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders an aligned plain-text table.
    ///
    /// Embedded newlines are shown as `\n` so every row stays on one line.
    pub fn render_text(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| single_line(c)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| single_line(c)).collect())
            .collect();

        let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format_line(&columns));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &rows {
            lines.push(format_line(row));
        }
        lines.join("\n")
    }
}

fn single_line(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}
