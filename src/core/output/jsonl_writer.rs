//! JSON Lines (JSONL) output writer.
//!
//! One JSON object per line, non-ASCII characters written verbatim. This is
//! the shape most fine-tuning pipelines ingest directly.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Writes records to a JSONL file.
///
/// ```jsonl
/// {"context":"Hello","response":"Hi"}
/// {"context":"How are you?","response":"Fine"}
/// ```
pub fn write_jsonl<T: Serialize>(records: &[T], output_path: impl AsRef<Path>) -> Result<()> {
    let rendered = to_jsonl(records)?;
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Renders records to a JSONL string.
pub fn to_jsonl<T: Serialize>(records: &[T]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}
