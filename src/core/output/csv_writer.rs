//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::{CsvStyle, TableRecord};
use crate::error::Result;

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Header row from [`TableRecord::HEADERS`], written even when `records` is empty
/// - Line terminator: `\n`
/// - Quoting: per [`CsvStyle`]
/// - Encoding: UTF-8
///
/// The file is only created once all records have been rendered in memory.
pub fn write_csv<R: TableRecord>(
    records: &[R],
    output_path: impl AsRef<Path>,
    style: CsvStyle,
) -> Result<()> {
    let rendered = to_csv(records, style)?;
    let mut file = File::create(output_path)?;
    file.write_all(rendered.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Renders records to a CSV string.
pub fn to_csv<R: TableRecord>(records: &[R], style: CsvStyle) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(style.into())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::HEADERS)?;

    for record in records {
        writer.write_record(record.fields())?;
    }

    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
