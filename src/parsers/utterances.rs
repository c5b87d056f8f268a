//! Reply-graph utterance corpus converter.
//!
//! Input is JSONL, one utterance per line:
//!
//! ```text
//! {"id": "u1", "text": "Is this a good idea?", "reply-to": null}
//! {"id": "u2", "text": "Probably not.", "reply-to": "u1"}
//! ```
//!
//! Each utterance becomes a `context` row; the text of the latest utterance
//! replying to it becomes its `response`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::config::UtteranceConfig;
use crate::core::models::{CsvStyle, TableRecord};
use crate::core::output::write_csv;
use crate::core::{Conversion, ConversionStats};
use crate::error::Result;
use crate::parser::{Converter, Source};

/// One line of the corpus. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawUtterance {
    id: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "reply-to", default)]
    reply_to: Option<Value>,
}

/// Output row: an utterance and the latest reply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextResponse {
    pub context: String,
    pub response: String,
    /// Position in first-seen order.
    pub original_index: usize,
}

impl TableRecord for ContextResponse {
    const HEADERS: &'static [&'static str] = &["context", "response", "original_index"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.context.clone(),
            self.response.clone(),
            self.original_index.to_string(),
        ]
    }
}

/// Utterance id. String `"1"` and number `1` are different ids; booleans
/// compare equal to `1` and `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum UtteranceKey {
    Text(String),
    Number(String),
}

fn utterance_key(value: &Value) -> Option<UtteranceKey> {
    match value {
        Value::String(s) => Some(UtteranceKey::Text(s.clone())),
        Value::Number(n) => Some(UtteranceKey::Number(n.to_string())),
        Value::Bool(b) => Some(UtteranceKey::Number(u8::from(*b).to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `null`, `false`, `0` and `""` mean "not a reply".
fn reply_key(value: &Value) -> Option<UtteranceKey> {
    let is_set = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    };
    if is_set { utterance_key(value) } else { None }
}

/// Collapses newline runs to a single space and trims.
fn clean_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.chars() {
        if ch == '\n' {
            if !in_break {
                cleaned.push(' ');
                in_break = true;
            }
        } else {
            cleaned.push(ch);
            in_break = false;
        }
    }
    cleaned.trim().to_string()
}

/// Converter for reply-graph utterance corpora.
pub struct UtteranceConverter {
    config: UtteranceConfig,
}

impl UtteranceConverter {
    pub fn new() -> Self {
        Self {
            config: UtteranceConfig::default(),
        }
    }

    pub fn with_config(config: UtteranceConfig) -> Self {
        Self { config }
    }
}

impl Default for UtteranceConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for UtteranceConverter {
    type Record = ContextResponse;

    fn name(&self) -> &'static str {
        "Utterances"
    }

    fn source(&self) -> Source {
        Source::Utterances
    }

    fn lossy_input(&self) -> bool {
        true
    }

    fn convert_str(&self, content: &str) -> Result<Conversion<ContextResponse>> {
        let mut rows: Vec<ContextResponse> = Vec::new();
        let mut index: HashMap<UtteranceKey, usize> = HashMap::new();
        let mut input_lines = 0;
        let mut parsed = 0;
        let mut skipped = 0;

        for line in content.lines() {
            input_lines += 1;
            let raw = line.trim();

            let utterance: RawUtterance = match serde_json::from_str(raw) {
                Ok(u) => u,
                Err(e) => {
                    warn!(line = raw, error = %e, "skipping invalid JSON");
                    skipped += 1;
                    continue;
                }
            };
            parsed += 1;

            let text = clean_text(utterance.text.as_deref().unwrap_or_default());
            if text.is_empty() || text == self.config.deleted_marker {
                warn!(line = raw, "skipping empty, deleted, or invalid text");
                skipped += 1;
                continue;
            }

            let Some(key) = utterance.id.as_ref().and_then(utterance_key) else {
                warn!(line = raw, "skipping utterance without id");
                skipped += 1;
                continue;
            };

            let entry = ContextResponse {
                context: text.clone(),
                response: String::new(),
                original_index: 0,
            };
            match index.get(&key) {
                Some(&pos) => rows[pos] = entry,
                None => {
                    index.insert(key, rows.len());
                    rows.push(entry);
                }
            }

            if let Some(&parent) = utterance
                .reply_to
                .as_ref()
                .and_then(reply_key)
                .as_ref()
                .and_then(|k| index.get(k))
            {
                rows[parent].response = text;
            }
        }

        if rows.is_empty() {
            error!("no valid utterances found, writing an empty table");
        }

        for (i, row) in rows.iter_mut().enumerate() {
            row.original_index = i;
        }

        let stats = ConversionStats::new(input_lines, parsed, skipped, rows.len());
        Ok(Conversion::new(rows, stats))
    }

    fn write(&self, records: &[ContextResponse], path: &Path) -> Result<()> {
        write_csv(records, path, CsvStyle::QuoteAll)
    }
}
