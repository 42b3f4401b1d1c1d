//! Single-slot notification holder.
//!
//! The holder never queues: every `show*` call replaces whatever was there.
//! Dismissal timing belongs to the presentation layer, which asks
//! [`Notification::display_duration`] how long to keep a message visible.

use std::fmt;
use std::time::Duration;

use crate::config::NotificationConfig;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An action completed.
    Success,
    /// An action failed.
    Error,
    /// An action was rejected but can be corrected.
    Warning,
    /// Neutral information.
    Info,
}

impl Severity {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// True for severities a one-shot command should treat as failure.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// Presentation class.
    pub severity: Severity,
    /// Explicit display time; `None` uses the severity default.
    pub duration: Option<Duration>,
}

impl Notification {
    /// Notification with the severity's default display time.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: None,
        }
    }

    /// Override the display time.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// How long the message stays on screen.
    #[must_use]
    pub fn display_duration(&self, config: &NotificationConfig) -> Duration {
        self.duration
            .unwrap_or_else(|| config.duration_for(self.severity))
    }
}

/// Holds at most one live notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
}

impl NotificationCenter {
    /// Empty holder.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Replace the current notification.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) {
        self.current = Some(Notification {
            message: message.into(),
            severity,
            duration,
        });
    }

    /// Replace the current notification with a success message.
    pub fn show_success(&mut self, message: impl Into<String>, duration: Option<Duration>) {
        self.show(message, Severity::Success, duration);
    }

    /// Replace the current notification with an error message.
    pub fn show_error(&mut self, message: impl Into<String>, duration: Option<Duration>) {
        self.show(message, Severity::Error, duration);
    }

    /// Replace the current notification with a warning.
    pub fn show_warning(&mut self, message: impl Into<String>, duration: Option<Duration>) {
        self.show(message, Severity::Warning, duration);
    }

    /// Replace the current notification with an informational message.
    pub fn show_info(&mut self, message: impl Into<String>, duration: Option<Duration>) {
        self.show(message, Severity::Info, duration);
    }

    /// Drop the current notification.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Notification currently held.
    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Remove and return the current notification.
    pub const fn take(&mut self) -> Option<Notification> {
        self.current.take()
    }
}
