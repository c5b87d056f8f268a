//! Unified converter trait for dialogue corpora.
//!
//! Every supported input format is handled by a type implementing
//! [`Converter`]: it turns the whole input into a table of records in memory
//! and knows how to write that table out.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "whatsapp")]
//! # fn main() -> chatpairs::Result<()> {
//! use chatpairs::parser::Converter;
//! use chatpairs::parsers::WhatsAppReconstructor;
//! use std::path::Path;
//!
//! let converter = WhatsAppReconstructor::new();
//! let conversion = converter.convert(Path::new("chat.txt"))?;
//! converter.write(&conversion.records, Path::new("cleaned_chat.csv"))?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "whatsapp"))]
//! # fn main() {}
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Conversion;
use crate::error::{ChatpairsError, Result};

/// Supported input corpora.
///
/// # Example
///
/// ```rust
/// use chatpairs::parser::Source;
/// use std::str::FromStr;
///
/// assert_eq!(Source::from_str("wa").unwrap(), Source::WhatsApp);
/// assert_eq!(Source::from_str("movies").unwrap(), Source::MovieScript);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// WhatsApp TXT export
    #[serde(rename = "whatsapp", alias = "wa")]
    #[cfg_attr(feature = "cli", value(name = "whatsapp", alias = "wa"))]
    WhatsApp,

    /// Reply-graph utterance corpus (JSONL with `id`, `text`, `reply-to`)
    #[serde(alias = "convo")]
    #[cfg_attr(feature = "cli", value(alias = "convo"))]
    Utterances,

    /// Movie script lines separated by ` +++$+++ `
    #[serde(alias = "movies")]
    #[cfg_attr(feature = "cli", value(alias = "movies"))]
    MovieScript,

    /// JSONL whose `f0_` field holds a JSON-encoded context/response pair
    #[serde(alias = "bq")]
    #[cfg_attr(feature = "cli", value(alias = "bq"))]
    NestedJsonl,
}

impl Source {
    /// Extension of the file this source is converted into.
    pub fn output_extension(&self) -> &'static str {
        match self {
            Source::NestedJsonl => "jsonl",
            Source::WhatsApp | Source::Utterances | Source::MovieScript => "csv",
        }
    }

    /// Returns all source names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "whatsapp",
            "wa",
            "utterances",
            "convo",
            "movie-script",
            "movies",
            "nested-jsonl",
            "bq",
        ]
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::WhatsApp => write!(f, "WhatsApp"),
            Source::Utterances => write!(f, "Utterances"),
            Source::MovieScript => write!(f, "Movie script"),
            Source::NestedJsonl => write!(f, "Nested JSONL"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(Source::WhatsApp),
            "utterances" | "convo" => Ok(Source::Utterances),
            "movie-script" | "movies" => Ok(Source::MovieScript),
            "nested-jsonl" | "bq" => Ok(Source::NestedJsonl),
            _ => Err(format!(
                "Unknown source: '{}'. Expected one of: {}",
                s,
                Source::all_names().join(", ")
            )),
        }
    }
}

/// A batch converter from one corpus format to one output table.
pub trait Converter {
    /// One output row.
    type Record;

    /// Human-readable converter name.
    fn name(&self) -> &'static str;

    /// The corpus this converter reads.
    fn source(&self) -> Source;

    /// Whether invalid UTF-8 in the input is replaced instead of rejected.
    fn lossy_input(&self) -> bool {
        false
    }

    /// Whether an empty result still produces an output file.
    fn write_when_empty(&self) -> bool {
        true
    }

    /// Converts in-memory content.
    fn convert_str(&self, content: &str) -> Result<Conversion<Self::Record>>;

    /// Reads `path` fully and converts it.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpairsError::MissingInput`] if the file cannot be read.
    fn convert(&self, path: &Path) -> Result<Conversion<Self::Record>> {
        let content = if self.lossy_input() {
            read_input_lossy(path)?
        } else {
            read_input(path)?
        };
        self.convert_str(&content)
    }

    /// Writes converted records to `path` in one shot.
    fn write(&self, records: &[Self::Record], path: &Path) -> Result<()>;
}

/// Reads a UTF-8 input file, stripping a leading byte-order mark.
pub fn read_input(path: &Path) -> Result<String> {
    let mut content =
        fs::read_to_string(path).map_err(|e| ChatpairsError::missing_input(path, e))?;
    if content.starts_with('\u{feff}') {
        content.drain(..'\u{feff}'.len_utf8());
    }
    Ok(content)
}

/// Reads an input file, replacing invalid UTF-8 sequences with U+FFFD.
pub fn read_input_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ChatpairsError::missing_input(path, e))?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(content.strip_prefix('\u{feff}').unwrap_or(&content).to_string())
}
