//! Configuration types for converters.
//!
//! Plain builder-style structs for library usage, without any CLI framework
//! dependencies.
//!
//! - [`WhatsAppConfig`] - WhatsApp reconstruction settings
//! - [`UtteranceConfig`] - reply-graph corpus settings
//! - [`MovieScriptConfig`] - movie script corpus settings
//!
//! # Example
//!
//! ```rust
//! use chatpairs::config::WhatsAppConfig;
//!
//! let config = WhatsAppConfig::new().with_response_window(45);
//! assert_eq!(config.response_window_minutes, 45);
//! ```

use serde::{Deserialize, Serialize};

/// Default window (minutes, inclusive) within which a message from a
/// different sender is linked to its predecessor.
pub const DEFAULT_RESPONSE_WINDOW_MINUTES: i64 = 30;

/// Sender substrings marking WhatsApp service notices.
pub const DEFAULT_SERVICE_MARKERS: &[&str] = &["Messages to this", "end-to-end encryption"];

/// What the WhatsApp converter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhatsAppMode {
    /// Full reconstruction: ids, timestamps, time gaps and response links.
    #[default]
    Linked,
    /// Segmentation and service-notice filtering only, in input order.
    Plain,
}

/// Configuration for WhatsApp export reconstruction.
///
/// # Example
///
/// ```rust
/// use chatpairs::config::{WhatsAppConfig, WhatsAppMode};
///
/// let config = WhatsAppConfig::plain();
/// assert_eq!(config.mode, WhatsAppMode::Plain);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Output mode (default: linked)
    pub mode: WhatsAppMode,

    /// Cross-sender response window in minutes, inclusive (default: 30)
    pub response_window_minutes: i64,

    /// Case-insensitive sender substrings that mark service notices
    pub service_markers: Vec<String>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            mode: WhatsAppMode::Linked,
            response_window_minutes: DEFAULT_RESPONSE_WINDOW_MINUTES,
            service_markers: DEFAULT_SERVICE_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl WhatsAppConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for plain (unlinked) output.
    pub fn plain() -> Self {
        Self {
            mode: WhatsAppMode::Plain,
            ..Self::default()
        }
    }

    /// Sets the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WhatsAppMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the cross-sender response window.
    #[must_use]
    pub fn with_response_window(mut self, minutes: i64) -> Self {
        self.response_window_minutes = minutes;
        self
    }

    /// Adds a service-notice marker.
    #[must_use]
    pub fn with_service_marker(mut self, marker: impl Into<String>) -> Self {
        self.service_markers.push(marker.into());
        self
    }
}

/// Configuration for reply-graph utterance corpora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtteranceConfig {
    /// Placeholder text of removed utterances (default: `[deleted]`)
    pub deleted_marker: String,
}

impl Default for UtteranceConfig {
    fn default() -> Self {
        Self {
            deleted_marker: "[deleted]".to_string(),
        }
    }
}

impl UtteranceConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deleted-utterance placeholder.
    #[must_use]
    pub fn with_deleted_marker(mut self, marker: impl Into<String>) -> Self {
        self.deleted_marker = marker.into();
        self
    }
}

/// Configuration for movie script corpora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieScriptConfig {
    /// Emit a row with an empty response for lines nobody answered (default: true)
    pub keep_unanswered: bool,
}

impl Default for MovieScriptConfig {
    fn default() -> Self {
        Self {
            keep_unanswered: true,
        }
    }
}

impl MovieScriptConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unanswered lines are kept.
    #[must_use]
    pub fn with_keep_unanswered(mut self, keep: bool) -> Self {
        self.keep_unanswered = keep;
        self
    }
}
