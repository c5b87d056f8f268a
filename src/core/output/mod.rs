//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with an explicit header row, fixed `\n`
//!   terminator and configurable quoting
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one object per line - requires
//!   the `nested-jsonl` feature
//!
//! Every writer renders the whole table in memory first, so a failed run never
//! leaves a half-written file behind.
//!
//! # Example
//!
//! ```rust
//! use chatpairs::core::models::{CsvStyle, TableRecord};
//! use chatpairs::core::output::to_csv;
//!
//! struct Row(&'static str);
//!
//! impl TableRecord for Row {
//!     const HEADERS: &'static [&'static str] = &["text"];
//!     fn fields(&self) -> Vec<String> {
//!         vec![self.0.to_string()]
//!     }
//! }
//!
//! let csv = to_csv(&[Row("hi")], CsvStyle::QuoteAll)?;
//! assert_eq!(csv, "\"text\"\n\"hi\"\n");
//! # Ok::<(), chatpairs::ChatpairsError>(())
//! ```

mod csv_writer;
#[cfg(feature = "nested-jsonl")]
mod jsonl_writer;

pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "nested-jsonl")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
