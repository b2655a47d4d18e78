//! Zip archive assembly for multi-sheet exports.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, SheetQueryError};

/// Builds an in-memory deflate zip with one entry per `(name, contents)`.
pub fn build_zip(entries: &[(String, String)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| SheetQueryError::export(format!("Failed to add {name}: {e}")))?;
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| SheetQueryError::export(format!("Failed to write {name}: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| SheetQueryError::export(format!("Failed to finish archive: {e}")))?;
    Ok(cursor.into_inner())
}
