//! Chat message types produced by the WhatsApp reconstructor.
//!
//! - [`Message`] is a segmented message exactly as it appeared in the export:
//!   id, raw date/time strings, sender and (possibly multi-line) text.
//! - [`LinkedMessage`] is a message that survived filtering and timestamp
//!   parsing, annotated with its parsed timestamp, the gap to its predecessor
//!   and the heuristic `responds_to` link.
//!
//! # Example
//!
//! ```
//! use chatpairs::Message;
//!
//! let msg = Message::new(1, "1/2/24", "10:00 AM", "Alice", "Hello");
//! assert_eq!(msg.id, 1);
//! assert_eq!(msg.line_count(), 1);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single message segmented from a line-oriented chat export.
///
/// | Field | Description |
/// |-------|-------------|
/// | `id` | 1-based, strictly increasing in input order |
/// | `date` | date string exactly as captured from the header |
/// | `time` | time string exactly as captured from the header |
/// | `sender` | trimmed sender name |
/// | `text` | header body plus continuation lines joined by `\n` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier assigned in order of first appearance, starting at 1.
    pub id: u64,
    /// Date as captured, e.g. `1/2/24`.
    pub date: String,
    /// Time as captured, e.g. `10:00 AM` or `22:15`.
    pub time: String,
    /// Sender, trimmed of surrounding whitespace.
    pub sender: String,
    /// Message text. Continuation lines are joined with `\n`.
    pub text: String,
}

impl Message {
    /// Creates a message from its captured parts.
    pub fn new(
        id: u64,
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Appends a continuation line, preserving the original line boundary.
    pub fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }

    /// Number of raw lines this message spans.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// A message placed on the timeline and linked to the message it most likely
/// answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedMessage {
    /// The segmented message.
    #[serde(flatten)]
    pub message: Message,

    /// Timestamp parsed from `date` + `time`.
    pub timestamp: NaiveDateTime,

    /// Minutes since the previous message in timestamp order.
    ///
    /// `None` for the first message of the timeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub time_diff: Option<f64>,

    /// Id of the message this one responds to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub responds_to: Option<u64>,
}

impl LinkedMessage {
    /// Places `message` at `timestamp` without any link.
    pub fn new(message: Message, timestamp: NaiveDateTime) -> Self {
        Self {
            message,
            timestamp,
            time_diff: None,
            responds_to: None,
        }
    }

    /// Returns the message id.
    pub fn id(&self) -> u64 {
        self.message.id
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.message.sender
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.message.text
    }
}
