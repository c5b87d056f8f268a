//! Nested JSONL converter.
//!
//! Table exports sometimes wrap each row's payload in a single string column.
//! Each input line looks like:
//!
//! ```text
//! {"f0_": "{\"context\": \"Hi\", \"response\": \"Hello\", \"original_index\": 3}"}
//! ```
//!
//! The payload is decoded and re-emitted as a flat `{"context", "response"}`
//! JSON line.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::output::write_jsonl;
use crate::core::{Conversion, ConversionStats};
use crate::error::Result;
use crate::parser::{Converter, Source};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "f0_")]
    payload: Option<String>,
}

/// Both fields pass through as raw JSON: `null` stays `null`, a missing key
/// becomes `""`.
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default = "empty_text")]
    context: Value,
    #[serde(default = "empty_text")]
    response: Value,
}

fn empty_text() -> Value {
    Value::String(String::new())
}

/// Output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPair {
    pub context: Value,
    pub response: Value,
}

/// Decodes both JSON layers of one line. A missing payload reads as `{}`.
fn decode_line(line: &str) -> serde_json::Result<PromptPair> {
    let envelope: Envelope = serde_json::from_str(line)?;
    let inner = envelope.payload.as_deref().unwrap_or("{}");
    let payload: Payload = serde_json::from_str(inner)?;
    Ok(PromptPair {
        context: payload.context,
        response: payload.response,
    })
}

/// Converter for JSONL rows with a JSON-encoded payload column.
#[derive(Debug, Default)]
pub struct NestedJsonlConverter;

impl NestedJsonlConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Converter for NestedJsonlConverter {
    type Record = PromptPair;

    fn name(&self) -> &'static str {
        "Nested JSONL"
    }

    fn source(&self) -> Source {
        Source::NestedJsonl
    }

    fn convert_str(&self, content: &str) -> Result<Conversion<PromptPair>> {
        let mut input_lines = 0;
        let mut pairs = Vec::new();

        for line in content.lines() {
            input_lines += 1;
            match decode_line(line) {
                Ok(pair) => pairs.push(pair),
                Err(e) => warn!(error = %e, "error decoding JSON, skipping line"),
            }
        }

        let stats = ConversionStats::new(
            input_lines,
            pairs.len(),
            input_lines - pairs.len(),
            pairs.len(),
        );
        Ok(Conversion::new(pairs, stats))
    }

    fn write(&self, records: &[PromptPair], path: &Path) -> Result<()> {
        write_jsonl(records, path)
    }
}
