//! WhatsApp export reconstruction primitives.
//!
//! The converter in [`crate::parsers::whatsapp`] chains these four stages:
//!
//! 1. [`segment`] - split raw lines into [`Message`]s, merging continuations
//! 2. [`filter_service_notices`] - drop encryption / "messages to this" notices
//! 3. [`place_on_timeline`] - parse timestamps, drop failures, stable-sort
//! 4. [`link_responses`] - annotate each message with its likely parent
//!
//! Supported header shape (Android-style export):
//!
//! ```text
//! 1/2/24, 10:00 AM - Alice: Hello
//! 12/31/2023, 22:15 - Bob: Late reply
//! ```

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

use crate::Message;
use crate::error::{ChatpairsError, Result};
use crate::message::LinkedMessage;

/// Header pattern: date, time (optional AM/PM), sender, body.
pub const HEADER_PATTERN: &str =
    r"^(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2}(?:\s?[APMapm]{2})?) - ([^:]+): (.+)";

/// Compiles [`HEADER_PATTERN`].
pub fn header_regex() -> Result<Regex> {
    Regex::new(HEADER_PATTERN).map_err(|e| ChatpairsError::invalid_pattern("WhatsApp", e.to_string()))
}

// =============================================================================
// Segmentation
// =============================================================================

/// Parser state while walking the export line by line.
#[derive(Debug)]
enum SegmentState {
    NoActiveMessage,
    BuildingMessage(Message),
}

/// Accumulator threaded through the fold in [`segment`].
struct Segmenter<'r> {
    header: &'r Regex,
    state: SegmentState,
    last_id: u64,
    messages: Vec<Message>,
    discarded: usize,
}

impl<'r> Segmenter<'r> {
    fn new(header: &'r Regex) -> Self {
        Self {
            header,
            state: SegmentState::NoActiveMessage,
            last_id: 0,
            messages: Vec::new(),
            discarded: 0,
        }
    }

    fn step(mut self, raw: &str) -> Self {
        let line = raw.trim();

        if let Some(caps) = self.header.captures(line) {
            if let SegmentState::BuildingMessage(done) =
                std::mem::replace(&mut self.state, SegmentState::NoActiveMessage)
            {
                self.messages.push(done);
            }

            self.last_id += 1;
            self.state = SegmentState::BuildingMessage(Message::new(
                self.last_id,
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map_or("", |m| m.as_str().trim()),
                caps.get(4).map_or("", |m| m.as_str().trim()),
            ));
            return self;
        }

        match &mut self.state {
            SegmentState::BuildingMessage(current) => current.push_line(line),
            SegmentState::NoActiveMessage => {
                debug!(line, "discarding line before first message header");
                self.discarded += 1;
            }
        }
        self
    }

    fn finish(mut self) -> Segmentation {
        if let SegmentState::BuildingMessage(last) = self.state {
            self.messages.push(last);
        }
        Segmentation {
            messages: self.messages,
            discarded_lines: self.discarded,
        }
    }
}

/// Result of [`segment`].
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    /// Messages in input order, ids `1..=n`.
    pub messages: Vec<Message>,
    /// Lines dropped because no header had been seen yet.
    pub discarded_lines: usize,
}

/// Splits raw export lines into messages.
///
/// A header line closes the open message and starts a new one; any other
/// line is appended to the open message, or discarded if none is open yet.
/// There is no escaping: a header-shaped line inside a message always starts
/// a new message.
///
/// # Example
///
/// ```
/// use chatpairs::parsing::whatsapp::{header_regex, segment};
///
/// let header = header_regex().unwrap();
/// let seg = segment(
///     ["1/2/24, 10:00 AM - Alice: Hello", "world"],
///     &header,
/// );
/// assert_eq!(seg.messages.len(), 1);
/// assert_eq!(seg.messages[0].text, "Hello\nworld");
/// ```
pub fn segment<'a, I>(lines: I, header: &Regex) -> Segmentation
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .fold(Segmenter::new(header), Segmenter::step)
        .finish()
}

// =============================================================================
// Service notices
// =============================================================================

/// Returns `true` if `sender` contains any marker, ignoring case.
pub fn is_service_notice<S: AsRef<str>>(sender: &str, markers: &[S]) -> bool {
    let sender = sender.to_lowercase();
    markers
        .iter()
        .any(|marker| sender.contains(&marker.as_ref().to_lowercase()))
}

/// Removes service notices, keeping the relative order of everything else.
pub fn filter_service_notices<S: AsRef<str>>(messages: Vec<Message>, markers: &[S]) -> Vec<Message> {
    messages
        .into_iter()
        .filter(|msg| !is_service_notice(&msg.sender, markers))
        .collect()
}

// =============================================================================
// Timestamps
// =============================================================================

/// Outcome of reading a header's date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampParse {
    /// A valid calendar date-time.
    Parsed(NaiveDateTime),
    /// The fields do not form a valid date-time.
    Unparseable,
}

impl TimestampParse {
    /// Converts into an `Option`, discarding the failure.
    pub fn ok(self) -> Option<NaiveDateTime> {
        match self {
            TimestampParse::Parsed(ts) => Some(ts),
            TimestampParse::Unparseable => None,
        }
    }
}

/// Uppercases the meridiem and guarantees a single space before it.
///
/// Hour `0` with a meridiem reads as `12` (`0:30 AM` is half past midnight).
fn normalize_time(time: &str) -> String {
    let mut normalized = time
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    let has_meridiem = normalized.ends_with("AM") || normalized.ends_with("PM");
    if !has_meridiem {
        return normalized;
    }
    if !normalized.ends_with(" AM") && !normalized.ends_with(" PM") {
        let split = normalized.len() - 2;
        normalized.insert(split, ' ');
    }
    let midnight_hour = normalized
        .strip_prefix("00:")
        .or_else(|| normalized.strip_prefix("0:"))
        .map(|rest| format!("12:{rest}"));
    midnight_hour.unwrap_or(normalized)
}

/// Parses `date` + `time` into a timestamp.
///
/// Dates are read month-first (`M/D/YY` or `M/D/YYYY`); when that does not
/// produce a valid calendar date the day-first reading is tried. Times may be
/// 24-hour or 12-hour with an `AM`/`PM` marker in any case, with or without a
/// space.
///
/// # Example
///
/// ```
/// use chatpairs::parsing::whatsapp::{TimestampParse, parse_timestamp};
///
/// assert!(matches!(parse_timestamp("1/2/24", "10:00 am"), TimestampParse::Parsed(_)));
/// assert_eq!(parse_timestamp("2/30/24", "10:00"), TimestampParse::Unparseable);
/// ```
pub fn parse_timestamp(date: &str, time: &str) -> TimestampParse {
    let year_digits = date.trim().rsplit('/').next().map_or(0, str::len);
    let year = match year_digits {
        2 => "%y",
        4 => "%Y",
        _ => return TimestampParse::Unparseable,
    };

    let time = normalize_time(time);
    let clock = if time.ends_with('M') { "%I:%M %p" } else { "%H:%M" };

    let month_first = format!("%m/%d/{year} {clock}");
    let day_first = format!("%d/%m/{year} {clock}");
    let combined = format!("{} {}", date.trim(), time);

    [month_first, day_first]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
        .map_or(TimestampParse::Unparseable, TimestampParse::Parsed)
}

/// Result of [`place_on_timeline`].
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// Messages sorted by `(timestamp, id)`, not yet linked.
    pub messages: Vec<LinkedMessage>,
    /// Messages dropped because their timestamp could not be parsed.
    pub unparseable: usize,
}

/// Parses every message's timestamp, drops failures and sorts the rest.
///
/// Equal timestamps keep their input order.
pub fn place_on_timeline(messages: Vec<Message>) -> Timeline {
    let mut unparseable = 0;
    let mut placed: Vec<LinkedMessage> = messages
        .into_iter()
        .filter_map(|msg| match parse_timestamp(&msg.date, &msg.time) {
            TimestampParse::Parsed(ts) => Some(LinkedMessage::new(msg, ts)),
            TimestampParse::Unparseable => {
                debug!(id = msg.id, date = %msg.date, time = %msg.time, "dropping message with unparseable timestamp");
                unparseable += 1;
                None
            }
        })
        .collect();

    placed.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id().cmp(&b.id())));

    Timeline {
        messages: placed,
        unparseable,
    }
}

// =============================================================================
// Response linking
// =============================================================================

/// Links each message to its predecessor on a sorted timeline.
///
/// For every adjacent pair `(prev, cur)`:
/// - same sender: `cur` responds to `prev`, whatever the gap;
/// - otherwise: `cur` responds to `prev` if the gap is at most
///   `window_minutes` (inclusive).
///
/// The first message never responds to anything.
pub fn link_responses(sorted: Vec<LinkedMessage>, window_minutes: i64) -> Vec<LinkedMessage> {
    let window = window_minutes as f64;
    let capacity = sorted.len();

    sorted
        .into_iter()
        .fold(Vec::with_capacity(capacity), |mut linked: Vec<LinkedMessage>, mut cur| {
            if let Some(prev) = linked.last() {
                let diff = (cur.timestamp - prev.timestamp).num_seconds() as f64 / 60.0;
                cur.time_diff = Some(diff);
                cur.responds_to = if cur.sender() == prev.sender() || diff <= window {
                    Some(prev.id())
                } else {
                    None
                };
            }
            linked.push(cur);
            linked
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SERVICE_MARKERS;

    fn seg(lines: &[&str]) -> Segmentation {
        let header = header_regex().unwrap();
        segment(lines.iter().copied(), &header)
    }

    fn ts(date: &str, time: &str) -> NaiveDateTime {
        parse_timestamp(date, time).ok().unwrap()
    }

    fn placed(id: u64, sender: &str, date: &str, time: &str) -> LinkedMessage {
        LinkedMessage::new(Message::new(id, date, time, sender, "x"), ts(date, time))
    }

    // -------------------------------------------------------------------------
    // segment
    // -------------------------------------------------------------------------

    #[test]
    fn test_segment_assigns_sequential_ids() {
        let result = seg(&[
            "1/2/24, 10:00 AM - Alice: Hello",
            "1/2/24, 10:05 AM - Bob: Hi there",
            "1/2/24, 11:00 AM - Bob: continuing thought",
        ]);
        let ids: Vec<u64> = result.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(result.messages[1].sender, "Bob");
        assert_eq!(result.messages[1].time, "10:05 AM");
    }

    #[test]
    fn test_segment_merges_continuations() {
        let result = seg(&[
            "1/2/24, 10:00 AM - Alice: first",
            "  second  ",
            "",
            "third",
            "1/2/24, 10:01 AM - Bob: ok",
        ]);
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].text, "first\nsecond\n\nthird");
        assert_eq!(result.messages[1].text, "ok");
    }

    #[test]
    fn test_segment_discards_leading_noise() {
        let result = seg(&["stray text", "more stray"]);
        assert!(result.messages.is_empty());
        assert_eq!(result.discarded_lines, 2);
    }

    #[test]
    fn test_segment_header_inside_message_starts_new() {
        let result = seg(&[
            "1/2/24, 10:00 AM - Alice: quoting:",
            "1/2/24, 9:00 AM - Bob: old words",
        ]);
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].id, 2);
    }

    #[test]
    fn test_segment_trims_sender_and_text() {
        let result = seg(&["  1/2/24, 10:00 AM - Alice : Hello   "]);
        assert_eq!(result.messages[0].sender, "Alice");
        assert_eq!(result.messages[0].text, "Hello");
    }

    #[test]
    fn test_segment_time_variants() {
        let result = seg(&[
            "1/2/24, 10:00AM - Alice: a",
            "1/2/2024, 10:00 pm - Alice: b",
            "12/31/24, 23:59 - Alice: c",
        ]);
        let times: Vec<&str> = result.messages.iter().map(|m| m.time.as_str()).collect();
        assert_eq!(times, vec!["10:00AM", "10:00 pm", "23:59"]);
    }

    #[test]
    fn test_segment_line_without_colon_is_continuation() {
        let result = seg(&[
            "1/2/24, 10:00 AM - Alice: Hello",
            "1/2/24, 10:01 AM - Bob left",
        ]);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].text, "Hello\n1/2/24, 10:01 AM - Bob left");
    }

    #[test]
    fn test_segment_empty_input() {
        let result = seg(&[]);
        assert!(result.messages.is_empty());
        assert_eq!(result.discarded_lines, 0);
    }

    // -------------------------------------------------------------------------
    // service notices
    // -------------------------------------------------------------------------

    #[test]
    fn test_is_service_notice() {
        assert!(is_service_notice(
            "Messages to this group are now secured with end-to-end encryption",
            DEFAULT_SERVICE_MARKERS
        ));
        assert!(is_service_notice("MESSAGES TO THIS CHAT", DEFAULT_SERVICE_MARKERS));
        assert!(!is_service_notice("Alice", DEFAULT_SERVICE_MARKERS));
    }

    #[test]
    fn test_filter_preserves_order() {
        let messages = vec![
            Message::new(1, "1/2/24", "10:00", "Alice", "a"),
            Message::new(2, "1/2/24", "10:00", "Messages to this chat", "x"),
            Message::new(3, "1/2/24", "10:00", "Bob", "b"),
            Message::new(4, "1/2/24", "10:00", "Carol", "c"),
        ];
        let kept = filter_service_notices(messages, DEFAULT_SERVICE_MARKERS);
        let ids: Vec<u64> = kept.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    // -------------------------------------------------------------------------
    // timestamps
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_timestamp_12_hour() {
        let parsed = ts("1/2/24", "10:00 PM");
        assert_eq!(parsed.to_string(), "2024-01-02 22:00:00");
    }

    #[test]
    fn test_parse_timestamp_no_space_lowercase() {
        assert_eq!(ts("1/2/24", "9:30am").to_string(), "2024-01-02 09:30:00");
        assert_eq!(ts("1/2/24", "12:05 am").to_string(), "2024-01-02 00:05:00");
    }

    #[test]
    fn test_parse_timestamp_24_hour_four_digit_year() {
        assert_eq!(ts("12/31/2023", "23:59").to_string(), "2023-12-31 23:59:00");
    }

    #[test]
    fn test_parse_timestamp_day_first_fallback() {
        assert_eq!(ts("25/12/2023", "08:00").to_string(), "2023-12-25 08:00:00");
    }

    #[test]
    fn test_parse_timestamp_failures() {
        assert_eq!(parse_timestamp("13/13/24", "10:00"), TimestampParse::Unparseable);
        assert_eq!(parse_timestamp("1/2/24", "25:00"), TimestampParse::Unparseable);
        assert_eq!(parse_timestamp("1/2/24", "13:00 PM"), TimestampParse::Unparseable);
        assert_eq!(parse_timestamp("1/2/202", "10:00"), TimestampParse::Unparseable);
        assert_eq!(parse_timestamp("1/2/24", "10:00 MA"), TimestampParse::Unparseable);
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time("10:00am"), "10:00 AM");
        assert_eq!(normalize_time("10:00\u{202f}pm"), "10:00 PM");
        assert_eq!(normalize_time("22:15"), "22:15");
        assert_eq!(normalize_time("0:30 am"), "12:30 AM");
        assert_eq!(normalize_time("00:05PM"), "12:05 PM");
        assert_eq!(normalize_time("0:30"), "0:30");
    }

    #[test]
    fn test_place_on_timeline_sorts_and_drops() {
        let messages = vec![
            Message::new(1, "1/2/24", "11:00 AM", "Alice", "late"),
            Message::new(2, "2/30/24", "10:00 AM", "Bob", "bad date"),
            Message::new(3, "1/2/24", "10:00 AM", "Carol", "early"),
            Message::new(4, "1/2/24", "10:00 AM", "Dave", "tie"),
        ];
        let timeline = place_on_timeline(messages);
        let ids: Vec<u64> = timeline.messages.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![3, 4, 1]);
        assert_eq!(timeline.unparseable, 1);
    }

    // -------------------------------------------------------------------------
    // linking
    // -------------------------------------------------------------------------

    #[test]
    fn test_link_worked_example() {
        let sorted = vec![
            placed(1, "Alice", "1/2/24", "10:00 AM"),
            placed(2, "Bob", "1/2/24", "10:05 AM"),
            placed(3, "Bob", "1/2/24", "11:00 AM"),
        ];
        let linked = link_responses(sorted, 30);
        assert_eq!(linked[0].responds_to, None);
        assert_eq!(linked[0].time_diff, None);
        assert_eq!(linked[1].responds_to, Some(1));
        assert_eq!(linked[1].time_diff, Some(5.0));
        assert_eq!(linked[2].responds_to, Some(2));
        assert_eq!(linked[2].time_diff, Some(55.0));
    }

    #[test]
    fn test_link_window_is_inclusive() {
        let sorted = vec![
            placed(1, "Alice", "1/2/24", "10:00"),
            placed(2, "Bob", "1/2/24", "10:30"),
            placed(3, "Alice", "1/2/24", "11:01"),
        ];
        let linked = link_responses(sorted, 30);
        assert_eq!(linked[1].responds_to, Some(1));
        assert_eq!(linked[2].responds_to, None);
    }

    #[test]
    fn test_link_same_sender_ignores_gap() {
        let sorted = vec![
            placed(1, "Alice", "1/2/24", "10:00"),
            placed(2, "Alice", "1/9/24", "10:00"),
        ];
        let linked = link_responses(sorted, 30);
        assert_eq!(linked[1].responds_to, Some(1));
    }

    #[test]
    fn test_link_uses_sorted_predecessor_not_input_order() {
        let timeline = place_on_timeline(vec![
            Message::new(1, "1/2/24", "10:10", "Alice", "second"),
            Message::new(2, "1/2/24", "10:00", "Bob", "first"),
        ]);
        let linked = link_responses(timeline.messages, 30);
        assert_eq!(linked[0].id(), 2);
        assert_eq!(linked[1].id(), 1);
        assert_eq!(linked[1].responds_to, Some(2));
    }

    #[test]
    fn test_link_empty() {
        assert!(link_responses(Vec::new(), 30).is_empty());
    }
}
