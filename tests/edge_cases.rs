//! Edge case tests for chatpairs
//!
//! Boundary conditions of WhatsApp reconstruction that are easy to get wrong:
//! timestamp shapes, the response window boundary and header-like text.

use chatpairs::config::WhatsAppConfig;
use chatpairs::parser::Converter;
use chatpairs::parsers::WhatsAppReconstructor;
use chatpairs::parsing::whatsapp::{TimestampParse, parse_timestamp};
use chatpairs::{LinkedMessage, Message};
use chrono::{NaiveDate, NaiveDateTime};

fn reconstruct(text: &str) -> Vec<LinkedMessage> {
    WhatsAppReconstructor::new().convert_str(text).unwrap().records
}

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

// =========================================================================
// Timestamp shapes
// =========================================================================

#[test]
fn test_timestamp_twelve_hour_variants() {
    let expected = TimestampParse::Parsed(dt(2024, 1, 2, 22, 15));
    assert_eq!(parse_timestamp("1/2/24", "10:15 PM"), expected);
    assert_eq!(parse_timestamp("1/2/24", "10:15 pm"), expected);
    assert_eq!(parse_timestamp("1/2/24", "10:15PM"), expected);
    assert_eq!(parse_timestamp("1/2/24", "10:15\u{202f}PM"), expected);
}

#[test]
fn test_timestamp_midnight_and_noon() {
    assert_eq!(
        parse_timestamp("1/2/24", "12:00 AM"),
        TimestampParse::Parsed(dt(2024, 1, 2, 0, 0))
    );
    assert_eq!(
        parse_timestamp("1/2/24", "12:00 PM"),
        TimestampParse::Parsed(dt(2024, 1, 2, 12, 0))
    );
}

#[test]
fn test_timestamp_zero_hour_with_meridiem() {
    assert_eq!(
        parse_timestamp("1/2/24", "0:30 AM"),
        TimestampParse::Parsed(dt(2024, 1, 2, 0, 30))
    );
    assert_eq!(
        parse_timestamp("1/2/24", "0:30 PM"),
        TimestampParse::Parsed(dt(2024, 1, 2, 12, 30))
    );

    let records = reconstruct("1/2/24, 0:30 AM - Alice: after midnight");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].timestamp, dt(2024, 1, 2, 0, 30));
}

#[test]
fn test_timestamp_twenty_four_hour() {
    assert_eq!(
        parse_timestamp("12/31/2023", "23:59"),
        TimestampParse::Parsed(dt(2023, 12, 31, 23, 59))
    );
}

#[test]
fn test_timestamp_day_first_fallback() {
    assert_eq!(
        parse_timestamp("25/12/23", "09:00"),
        TimestampParse::Parsed(dt(2023, 12, 25, 9, 0))
    );
    // Ambiguous dates read month-first
    assert_eq!(
        parse_timestamp("3/4/24", "09:00"),
        TimestampParse::Parsed(dt(2024, 3, 4, 9, 0))
    );
}

#[test]
fn test_timestamp_unparseable() {
    assert_eq!(parse_timestamp("1/2/240", "10:00"), TimestampParse::Unparseable);
    assert_eq!(parse_timestamp("13/13/24", "10:00"), TimestampParse::Unparseable);
    assert_eq!(parse_timestamp("1/2/24", "25:00"), TimestampParse::Unparseable);
    assert_eq!(parse_timestamp("1/2/24", "13:00 PM"), TimestampParse::Unparseable);
    assert_eq!(parse_timestamp("2/29/23", "10:00"), TimestampParse::Unparseable);
}

#[test]
fn test_leap_day() {
    assert_eq!(
        parse_timestamp("2/29/24", "10:00"),
        TimestampParse::Parsed(dt(2024, 2, 29, 10, 0))
    );
}

#[test]
fn test_three_digit_year_dropped() {
    let records = reconstruct(
        "1/2/240, 10:00 AM - Alice: odd year\n\
         1/2/24, 10:00 AM - Bob: fine",
    );
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sender(), "Bob");
    assert_eq!(records[0].id(), 2);
}

// =========================================================================
// Response window
// =========================================================================

#[test]
fn test_exact_window_boundary_links() {
    let records = reconstruct(
        "1/2/24, 10:00 - Alice: a\n\
         1/2/24, 10:30 - Bob: b\n\
         1/2/24, 11:01 - Carol: c",
    );
    assert_eq!(records[1].responds_to, Some(1));
    assert_eq!(records[1].time_diff, Some(30.0));
    assert_eq!(records[2].responds_to, None);
    assert_eq!(records[2].time_diff, Some(31.0));
}

#[test]
fn test_same_sender_links_across_days() {
    let records = reconstruct(
        "1/2/24, 10:00 - Alice: today\n\
         1/9/24, 10:00 - Alice: a week later",
    );
    assert_eq!(records[1].responds_to, Some(1));
    assert_eq!(records[1].time_diff, Some(7.0 * 24.0 * 60.0));
}

#[test]
fn test_zero_window_only_links_same_sender_or_ties() {
    let config = WhatsAppConfig::new().with_response_window(0);
    let records = WhatsAppReconstructor::with_config(config)
        .convert_str(
            "1/2/24, 10:00 - Alice: a\n\
             1/2/24, 10:00 - Bob: same minute\n\
             1/2/24, 10:01 - Carol: one later",
        )
        .unwrap()
        .records;
    assert_eq!(records[1].responds_to, Some(1));
    assert_eq!(records[2].responds_to, None);
}

#[test]
fn test_equal_timestamps_keep_input_order() {
    let records = reconstruct(
        "1/2/24, 10:00 - Alice: first\n\
         1/2/24, 10:00 - Bob: second\n\
         1/2/24, 10:00 - Carol: third\n\
         1/2/24, 9:00 - Dave: earliest",
    );
    let ids: Vec<u64> = records.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec![4, 1, 2, 3]);
    assert_eq!(records[0].responds_to, None);
    assert_eq!(records[1].responds_to, None);
    assert_eq!(records[1].time_diff, Some(60.0));
}

// =========================================================================
// Segmentation corner cases
// =========================================================================

#[test]
fn test_header_shaped_text_starts_new_message() {
    let records = reconstruct(
        "1/2/24, 10:00 - Alice: quoting:\n\
         1/2/24, 9:00 - Bob: this looks like a header",
    );
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sender(), "Bob");
}

#[test]
fn test_colon_in_body_kept() {
    let records = reconstruct("1/2/24, 10:00 - Alice: note: meet at 10:30");
    assert_eq!(records[0].sender(), "Alice");
    assert_eq!(records[0].text(), "note: meet at 10:30");
}

#[test]
fn test_empty_continuation_lines_kept() {
    let records = reconstruct("1/2/24, 10:00 - Alice: top\n\n   \nbottom");
    assert_eq!(records[0].text(), "top\n\n\nbottom");
}

#[test]
fn test_system_line_without_sender_is_continuation() {
    let records = reconstruct(
        "1/2/24, 10:00 - Alice: hi\n\
         1/2/24, 10:01 - Bob joined using this group's invite link",
    );
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].text(),
        "hi\n1/2/24, 10:01 - Bob joined using this group's invite link"
    );
}

#[test]
fn test_unicode_senders_and_text() {
    let records = reconstruct(
        "1/2/24, 10:00 - Иван: Привет мир! 🎉\n\
         1/2/24, 10:01 - 田中太郎: こんにちは\n\
         1/2/24, 10:02 - محمد: مرحبا",
    );
    let senders: Vec<&str> = records.iter().map(|m| m.sender()).collect();
    assert_eq!(senders, vec!["Иван", "田中太郎", "محمد"]);
    assert_eq!(records[0].text(), "Привет мир! 🎉");
}

#[test]
fn test_service_marker_case_insensitive() {
    let records = reconstruct(
        "1/2/24, 10:00 - MESSAGES TO THIS GROUP are secured: info\n\
         1/2/24, 10:01 - Alice: real",
    );
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), 2);
    assert_eq!(records[0].responds_to, None);
}

#[test]
fn test_message_line_count() {
    let mut msg = Message::new(1, "1/2/24", "10:00", "Alice", "one");
    msg.push_line("two");
    msg.push_line("three");
    assert_eq!(msg.line_count(), 3);
    assert_eq!(msg.text, "one\ntwo\nthree");
}
