//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`default_output_path`] - output naming when `-o` is not given
//!
//! The [`Source`] enum itself lives in [`crate::parser`] so that library users
//! can name a corpus without pulling in clap.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::DEFAULT_RESPONSE_WINDOW_MINUTES;
pub use crate::parser::Source;

/// Turn raw chat and dialogue corpora into context/response tables.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpairs")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpairs whatsapp chat.txt
    chatpairs wa chat.txt --window 45 -o pairs.csv
    chatpairs wa chat.txt --plain
    chatpairs convo utterances.jsonl
    chatpairs movies movie_lines.txt
    chatpairs bq export.jsonl")]
pub struct Args {
    /// Input corpus type
    #[arg(value_enum)]
    pub source: Source,

    /// Path to input file
    pub input: String,

    /// Path to output file [default: cleaned_<input stem>.<csv|jsonl>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// WhatsApp only: segment and filter without timestamps or links
    #[arg(long)]
    pub plain: bool,

    /// WhatsApp only: cross-sender response window in minutes
    #[arg(short, long, value_name = "MINUTES", default_value_t = DEFAULT_RESPONSE_WINDOW_MINUTES)]
    pub window: i64,
}

impl Args {
    /// Output path, falling back to [`default_output_path`].
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => default_output_path(Path::new(&self.input), self.source),
        }
    }
}

/// `cleaned_<stem>.<ext>` in the current directory.
///
/// ```rust
/// use chatpairs::cli::{Source, default_output_path};
/// use std::path::Path;
///
/// let path = default_output_path(Path::new("exports/chat.txt"), Source::WhatsApp);
/// assert_eq!(path.to_str(), Some("cleaned_chat.csv"));
/// ```
pub fn default_output_path(input: &Path, source: Source) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("cleaned_{}.{}", stem, source.output_extension()))
}
