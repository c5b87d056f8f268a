//! Movie script corpus converter.
//!
//! Each input line is one spoken line, fields separated by ` +++$+++ `:
//!
//! ```text
//! 10 +++$+++ Some Movie +++$+++ 11 +++$+++ ALICE +++$+++  +++$+++ Where were you?
//! 11 +++$+++ Some Movie +++$+++ 12 +++$+++ BOB +++$+++ 10 +++$+++ Out.
//! ```
//!
//! The fifth field names the line being answered. Every line becomes a
//! context, paired with each line that answers it.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::config::MovieScriptConfig;
use crate::core::models::{CsvStyle, TableRecord};
use crate::core::output::write_csv;
use crate::core::{Conversion, ConversionStats};
use crate::error::Result;
use crate::parser::{Converter, Source};
use crate::parsing::movie_script::{ScriptLine, line_regex, parse_line};

/// Output row: a line, who said it, and one answer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPair {
    /// Position of the answering line, or of the context line when unanswered.
    pub index: usize,
    pub movie_title: String,
    pub speaker: String,
    pub context: String,
    pub response: String,
}

impl TableRecord for ScriptPair {
    const HEADERS: &'static [&'static str] =
        &["index", "movie_title", "speaker", "context", "response"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.movie_title.clone(),
            self.speaker.clone(),
            self.context.clone(),
            self.response.clone(),
        ]
    }
}

/// Pairs every script line with the lines that answer it.
///
/// Answers are matched by their `response_num` field, in input order.
pub fn pair_lines(lines: &[ScriptLine], keep_unanswered: bool) -> Vec<ScriptPair> {
    let mut answers: HashMap<u64, Vec<usize>> = HashMap::new();
    for (pos, line) in lines.iter().enumerate() {
        if let Some(target) = line.response_num {
            answers.entry(target).or_default().push(pos);
        }
    }

    let mut pairs = Vec::with_capacity(lines.len());
    for (pos, line) in lines.iter().enumerate() {
        match answers.get(&line.line_num) {
            Some(responders) => {
                pairs.extend(responders.iter().map(|&r| ScriptPair {
                    index: r,
                    movie_title: line.movie_title.clone(),
                    speaker: line.speaker.clone(),
                    context: line.dialogue.clone(),
                    response: lines[r].dialogue.clone(),
                }));
            }
            None if keep_unanswered => pairs.push(ScriptPair {
                index: pos,
                movie_title: line.movie_title.clone(),
                speaker: line.speaker.clone(),
                context: line.dialogue.clone(),
                response: String::new(),
            }),
            None => {}
        }
    }
    pairs
}

/// Converter for `+++$+++`-separated movie script corpora.
pub struct MovieScriptConverter {
    config: MovieScriptConfig,
}

impl MovieScriptConverter {
    pub fn new() -> Self {
        Self {
            config: MovieScriptConfig::default(),
        }
    }

    pub fn with_config(config: MovieScriptConfig) -> Self {
        Self { config }
    }
}

impl Default for MovieScriptConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for MovieScriptConverter {
    type Record = ScriptPair;

    fn name(&self) -> &'static str {
        "Movie script"
    }

    fn source(&self) -> Source {
        Source::MovieScript
    }

    fn lossy_input(&self) -> bool {
        true
    }

    fn write_when_empty(&self) -> bool {
        false
    }

    fn convert_str(&self, content: &str) -> Result<Conversion<ScriptPair>> {
        let regex = line_regex()?;
        let mut input_lines = 0;
        let mut script = Vec::new();

        for raw in content.lines() {
            input_lines += 1;
            match parse_line(&regex, raw) {
                Some(line) => script.push(line),
                None => warn!(line = raw.trim(), "skipped malformed line"),
            }
        }

        if script.is_empty() {
            warn!("no valid script lines found");
        }

        let pairs = pair_lines(&script, self.config.keep_unanswered);
        let stats = ConversionStats::new(
            input_lines,
            script.len(),
            input_lines - script.len(),
            pairs.len(),
        );
        Ok(Conversion::new(pairs, stats))
    }

    fn write(&self, records: &[ScriptPair], path: &Path) -> Result<()> {
        write_csv(records, path, CsvStyle::QuoteAll)
    }
}
