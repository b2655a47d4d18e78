//! Identifier sanitization for headers and sheet names.

use regex::Regex;
use std::sync::OnceLock;

/// Matches a single character that is not allowed in an identifier.
fn invalid_char_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"))
}

/// Replaces every disallowed character with `_`, one for one.
fn replace_invalid(raw: &str) -> String {
    invalid_char_regex().replace_all(raw, "_").into_owned()
}

/// Cleans a header cell into a column identifier.
///
/// Absent or empty headers become `Column{index + 1}`. Headers starting with
/// a digit get a leading `_`.
pub fn clean_column_name(raw: Option<&str>, index: usize) -> String {
    let cleaned = match raw {
        Some(text) if !text.is_empty() => replace_invalid(text),
        _ => return format!("Column{}", index + 1),
    };

    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{cleaned}")
    } else {
        cleaned
    }
}

/// Sanitizes a sheet name into a table name.
pub fn sanitize_table_name(sheet_name: &str) -> String {
    replace_invalid(sheet_name)
}

/// Quotes an identifier for use in generated SQL.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
