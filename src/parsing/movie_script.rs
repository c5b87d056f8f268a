//! Movie script line parsing.

use regex::Regex;

use crate::error::{ChatpairsError, Result};

/// `line_num +++$+++ title +++$+++ next_line +++$+++ speaker +++$+++ [response_num] +++$+++ dialogue`
pub const LINE_PATTERN: &str = r"^(\d+)\s\+\+\+\$\+\+\+\s(.*?)\s\+\+\+\$\+\+\+\s(\d+)\s\+\+\+\$\+\+\+\s(.*?)\s\+\+\+\$\+\+\+\s(\d+)?\s\+\+\+\$\+\+\+\s(.*)$";

/// Compiles [`LINE_PATTERN`].
pub fn line_regex() -> Result<Regex> {
    Regex::new(LINE_PATTERN)
        .map_err(|e| ChatpairsError::invalid_pattern("movie script", e.to_string()))
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line_num: u64,
    pub movie_title: String,
    pub speaker: String,
    /// Line number this line answers, if any.
    pub response_num: Option<u64>,
    pub dialogue: String,
}

/// Parses one raw line, or `None` if it does not match.
///
/// Numbers too large for `u64` are treated as malformed.
pub fn parse_line(regex: &Regex, raw: &str) -> Option<ScriptLine> {
    let caps = regex.captures(raw.trim())?;
    let line_num = caps.get(1)?.as_str().parse().ok()?;
    let response_num = match caps.get(5) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };

    Some(ScriptLine {
        line_num,
        movie_title: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        speaker: caps.get(4).map_or("", |m| m.as_str()).to_string(),
        response_num,
        dialogue: caps.get(6).map_or("", |m| m.as_str()).to_string(),
    })
}
