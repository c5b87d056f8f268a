//! # Chatpairs
//!
//! A Rust library for turning raw chat and dialogue corpora into tidy
//! context/response tables.
//!
//! ## Overview
//!
//! Chatpairs converts four kinds of input:
//! - **WhatsApp** - TXT exports, rebuilt into a linked message timeline
//! - **Utterances** - reply-graph JSONL corpora (`id`, `text`, `reply-to`)
//! - **Movie scripts** - line corpora separated by ` +++$+++ `
//! - **Nested JSONL** - table dumps whose payload is a JSON-encoded string
//!
//! Every conversion is batch and in memory: the input is read once, converted
//! to records and written in one shot.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "whatsapp")]
//! # fn main() -> chatpairs::Result<()> {
//! use chatpairs::prelude::*;
//!
//! let export = "1/2/24, 10:00 AM - Alice: Hello\n\
//!               1/2/24, 10:05 AM - Bob: Hi there";
//!
//! let conversion = WhatsAppReconstructor::new().convert_str(export)?;
//! assert_eq!(conversion.records[1].responds_to, Some(1));
//!
//! let csv = to_csv(&conversion.records, CsvStyle::QuoteAll)?;
//! assert!(csv.starts_with("\"message_id\""));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "whatsapp"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Converter`](parser::Converter) trait and [`Source`](parser::Source)
//! - [`parsers`] - one converter per corpus format
//! - [`parsing`] - line-level parsing, segmentation and linking
//! - [`config`] - converter configuration
//! - [`core`] - table records, conversion stats and output writers
//! - [`message`] - [`Message`] and [`LinkedMessage`]
//! - [`error`] - [`ChatpairsError`] and [`Result`]
//! - [`cli`] - command-line arguments (requires the `cli` feature)
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpairsError, Result};
pub use message::{LinkedMessage, Message};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpairs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{LinkedMessage, Message};

    pub use crate::error::{ChatpairsError, Result};

    pub use crate::parser::{Converter, Source};

    pub use crate::config::{MovieScriptConfig, UtteranceConfig, WhatsAppConfig, WhatsAppMode};

    pub use crate::core::{Conversion, ConversionStats, CsvStyle, TableRecord, to_csv, write_csv};
    #[cfg(feature = "nested-jsonl")]
    pub use crate::core::{to_jsonl, write_jsonl};

    #[cfg(feature = "whatsapp")]
    pub use crate::parsers::{WhatsAppPlainParser, WhatsAppReconstructor};

    #[cfg(feature = "utterances")]
    pub use crate::parsers::UtteranceConverter;

    #[cfg(feature = "movie-script")]
    pub use crate::parsers::MovieScriptConverter;

    #[cfg(feature = "nested-jsonl")]
    pub use crate::parsers::NestedJsonlConverter;
}
