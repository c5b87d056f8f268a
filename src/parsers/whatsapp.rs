//! WhatsApp TXT export converters.
//!
//! - [`WhatsAppReconstructor`] rebuilds the full timeline: ids, timestamps,
//!   time gaps and heuristic `response_to_id` links.
//! - [`WhatsAppPlainParser`] only segments and filters, keeping input order.
//!
//! Expected input (Android-style export):
//!
//! ```text
//! 1/2/24, 10:00 AM - Alice: Hello
//! 1/2/24, 10:05 AM - Bob: Hi there
//! and a second line
//! ```

use std::path::Path;

use tracing::info;

use crate::Message;
use crate::config::WhatsAppConfig;
use crate::core::models::{CsvStyle, TableRecord, optional_cell};
use crate::core::output::write_csv;
use crate::core::{Conversion, ConversionStats};
use crate::error::Result;
use crate::message::LinkedMessage;
use crate::parser::{Converter, Source};
use crate::parsing::whatsapp::{
    Segmentation, filter_service_notices, header_regex, link_responses, place_on_timeline, segment,
};

/// Format used for the `timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rebuilds a WhatsApp conversation and links responses.
///
/// # Example
///
/// ```rust
/// use chatpairs::parsers::WhatsAppReconstructor;
///
/// let export = "1/2/24, 10:00 AM - Alice: Hello\n\
///               1/2/24, 10:05 AM - Bob: Hi there\n\
///               1/2/24, 11:00 AM - Bob: continuing thought";
///
/// let messages = WhatsAppReconstructor::new().reconstruct(export.lines())?.records;
/// assert_eq!(messages[1].responds_to, Some(1));
/// assert_eq!(messages[2].responds_to, Some(2));
/// # Ok::<(), chatpairs::ChatpairsError>(())
/// ```
pub struct WhatsAppReconstructor {
    config: WhatsAppConfig,
}

impl WhatsAppReconstructor {
    /// Creates a reconstructor with default configuration.
    pub fn new() -> Self {
        Self {
            config: WhatsAppConfig::default(),
        }
    }

    /// Creates a reconstructor with custom configuration.
    pub fn with_config(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Runs segmentation, filtering, ordering and linking over raw lines.
    pub fn reconstruct<'a, I>(&self, lines: I) -> Result<Conversion<LinkedMessage>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let header = header_regex()?;
        let mut input_lines = 0;
        let Segmentation {
            messages,
            discarded_lines,
        } = segment(lines.into_iter().inspect(|_| input_lines += 1), &header);
        let parsed = messages.len();

        let messages = filter_service_notices(messages, &self.config.service_markers);
        let notices = parsed - messages.len();

        let timeline = place_on_timeline(messages);
        let linked = link_responses(timeline.messages, self.config.response_window_minutes);

        info!(
            parsed,
            notices,
            unparseable = timeline.unparseable,
            linked = linked.iter().filter(|m| m.responds_to.is_some()).count(),
            "reconstructed WhatsApp timeline"
        );

        let stats = ConversionStats::new(
            input_lines,
            parsed,
            discarded_lines + notices + timeline.unparseable,
            linked.len(),
        );
        Ok(Conversion::new(linked, stats))
    }
}

impl Default for WhatsAppReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for WhatsAppReconstructor {
    type Record = LinkedMessage;

    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn source(&self) -> Source {
        Source::WhatsApp
    }

    fn convert_str(&self, content: &str) -> Result<Conversion<LinkedMessage>> {
        self.reconstruct(content.lines())
    }

    fn write(&self, records: &[LinkedMessage], path: &Path) -> Result<()> {
        write_csv(records, path, CsvStyle::QuoteAll)
    }
}

/// Renders a minute count the way the downstream tables expect (`5.0`, `0.5`).
fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{minutes:.1}")
    } else {
        minutes.to_string()
    }
}

impl TableRecord for LinkedMessage {
    const HEADERS: &'static [&'static str] = &[
        "message_id",
        "date",
        "time",
        "sender",
        "message",
        "timestamp",
        "time_diff",
        "response_to_id",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.message.id.to_string(),
            self.message.date.clone(),
            self.message.time.clone(),
            self.message.sender.clone(),
            self.message.text.clone(),
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.time_diff.map(format_minutes).unwrap_or_default(),
            optional_cell(self.responds_to),
        ]
    }
}

/// Segments a WhatsApp export without timestamps or links.
///
/// Service notices are still removed. Output keeps input order and uses
/// minimal CSV quoting.
pub struct WhatsAppPlainParser {
    config: WhatsAppConfig,
}

impl WhatsAppPlainParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: WhatsAppConfig::plain(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    /// Segments raw lines and removes service notices.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Result<Conversion<Message>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let header = header_regex()?;
        let mut input_lines = 0;
        let segmentation = segment(lines.into_iter().inspect(|_| input_lines += 1), &header);
        let parsed = segmentation.messages.len();
        let messages = filter_service_notices(segmentation.messages, &self.config.service_markers);

        info!(parsed, kept = messages.len(), "segmented WhatsApp export");

        let stats = ConversionStats::new(
            input_lines,
            parsed,
            segmentation.discarded_lines + (parsed - messages.len()),
            messages.len(),
        );
        Ok(Conversion::new(messages, stats))
    }
}

impl Default for WhatsAppPlainParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for WhatsAppPlainParser {
    type Record = Message;

    fn name(&self) -> &'static str {
        "WhatsApp (plain)"
    }

    fn source(&self) -> Source {
        Source::WhatsApp
    }

    fn convert_str(&self, content: &str) -> Result<Conversion<Message>> {
        self.parse_lines(content.lines())
    }

    fn write(&self, records: &[Message], path: &Path) -> Result<()> {
        write_csv(records, path, CsvStyle::Minimal)
    }
}

impl TableRecord for Message {
    const HEADERS: &'static [&'static str] = &["date", "time", "sender", "message"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.time.clone(),
            self.sender.clone(),
            self.text.clone(),
        ]
    }
}
