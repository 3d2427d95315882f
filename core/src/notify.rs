//! Transient user-facing notifications.
//!
//! Views push notifications into an outbox; the host drains it and decides
//! how to show them (toast, log line, stderr). Auto-dismiss timing is the
//! host's job — [`DISMISS_AFTER`] is the agreed duration.

use std::time::Duration;

/// How long a notification stays visible before auto-dismissing.
pub const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            severity: Severity::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            severity: Severity::Error,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}
