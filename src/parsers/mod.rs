//! Corpus converters.
//!
//! Each converter implements [`Converter`](crate::parser::Converter):
//!
//! - [`WhatsAppReconstructor`] - WhatsApp TXT export to linked message table
//! - [`WhatsAppPlainParser`] - WhatsApp TXT export to plain message table
//! - [`UtteranceConverter`] - reply-graph JSONL to context/response table
//! - [`MovieScriptConverter`] - `+++$+++` script lines to context/response table
//! - [`NestedJsonlConverter`] - wrapped JSONL payloads to flat JSONL
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "utterances")]
//! # fn main() -> chatpairs::Result<()> {
//! use chatpairs::parser::Converter;
//! use chatpairs::parsers::UtteranceConverter;
//!
//! let conversion = UtteranceConverter::new().convert_str(
//!     r#"{"id": "a", "text": "Hi"}
//! {"id": "b", "text": "Hello", "reply-to": "a"}"#,
//! )?;
//! assert_eq!(conversion.records[0].response, "Hello");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "utterances"))]
//! # fn main() {}
//! ```

#[cfg(feature = "whatsapp")]
pub mod whatsapp;

#[cfg(feature = "utterances")]
pub mod utterances;

#[cfg(feature = "movie-script")]
pub mod movie_script;

#[cfg(feature = "nested-jsonl")]
pub mod nested_jsonl;

#[cfg(feature = "whatsapp")]
pub use whatsapp::{TIMESTAMP_FORMAT, WhatsAppPlainParser, WhatsAppReconstructor};

#[cfg(feature = "utterances")]
pub use utterances::{ContextResponse, UtteranceConverter};

#[cfg(feature = "movie-script")]
pub use movie_script::{MovieScriptConverter, ScriptPair, pair_lines};

#[cfg(feature = "nested-jsonl")]
pub use nested_jsonl::{NestedJsonlConverter, PromptPair};
