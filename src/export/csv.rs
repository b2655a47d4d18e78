//! CSV serialization of query results.
//!
//! Fields are quoted only when they contain a comma, a double quote or a
//! newline. A carriage return alone does not trigger quoting, and an empty
//! field is written as nothing at all, which is why this is not delegated to
//! the `csv` writer.

use crate::db::{QueryResult, Value};

/// Escapes one CSV field. A missing value becomes the empty field.
pub fn escape_csv(value: Option<&str>) -> String {
    match value {
        None => String::new(),
        Some(s) if s.contains([',', '"', '\n']) => format!("\"{}\"", s.replace('"', "\"\"")),
        Some(s) => s.to_string(),
    }
}

/// Serializes a result as CSV text.
///
/// The header line is followed by one line per row, joined by `\n` with no
/// trailing newline. An empty result yields the empty string.
pub fn to_csv(result: &QueryResult) -> String {
    if result.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(
        result
            .columns
            .iter()
            .map(|c| escape_csv(Some(&c.name)))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in &result.rows {
        lines.push(row.iter().map(csv_field).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

fn csv_field(value: &Value) -> String {
    if value.is_null() {
        String::new()
    } else {
        escape_csv(Some(&value.to_display_string()))
    }
}
