//! Core output models shared by every converter.

/// A flat row that can be written as one CSV record.
///
/// The header is a constant so that an empty table still gets its header row.
pub trait TableRecord {
    /// Column names, in output order.
    const HEADERS: &'static [&'static str];

    /// Field values, in the same order as [`HEADERS`](Self::HEADERS).
    fn fields(&self) -> Vec<String>;
}

/// Quoting policy for CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvStyle {
    /// Every field quoted, `\n` line terminator.
    #[default]
    QuoteAll,
    /// Quote only fields that need it.
    Minimal,
}

impl From<CsvStyle> for csv::QuoteStyle {
    fn from(style: CsvStyle) -> Self {
        match style {
            CsvStyle::QuoteAll => csv::QuoteStyle::Always,
            CsvStyle::Minimal => csv::QuoteStyle::Necessary,
        }
    }
}

/// Formats an optional integer the way an empty table cell reads back.
pub fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
