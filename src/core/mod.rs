//! Core processing types for chatpairs.
//!
//! This module contains:
//! - [`models`] - the [`TableRecord`] row abstraction and CSV quoting styles
//! - [`processor`] - conversion results and statistics
//! - [`output`] - format writers (CSV, JSONL)

pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use models::{CsvStyle, TableRecord};
pub use output::{to_csv, write_csv};
#[cfg(feature = "nested-jsonl")]
pub use output::{to_jsonl, write_jsonl};
pub use processor::{Conversion, ConversionStats};
