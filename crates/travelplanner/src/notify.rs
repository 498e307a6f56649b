//! Transient user notifications.
//!
//! Notifications are never awaited. Each one carries an expiry deadline and
//! [`Notifier::expire`] sweeps out the ones that have run their course.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

/// Default time a notification stays visible.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Neutral information.
    #[default]
    Info,
    /// An action completed.
    Success,
    /// Something went wrong but the session continues.
    Warning,
}

impl Level {
    /// Lowercase name, also used as the CSS modifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown for a limited time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// Severity.
    pub level: Level,
    /// When the notification appeared.
    pub shown_at: Instant,
    /// When it should disappear.
    pub expires_at: Instant,
}

impl Notification {
    /// Whether the notification should be gone at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Stack of visible notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    duration: Duration,
    active: Vec<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Notifier {
    /// Create a notifier whose notifications last `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: Vec::new(),
        }
    }

    /// How long each notification stays visible.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `message` starting now.
    pub fn push(&mut self, message: impl Into<String>, level: Level) -> &Notification {
        self.push_at(message, level, Instant::now())
    }

    /// Show `message` starting at `now`.
    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        level: Level,
        now: Instant,
    ) -> &Notification {
        let message = message.into();
        debug!(%level, %message, "Notification");
        self.active.push(Notification {
            message,
            level,
            shown_at: now,
            expires_at: now + self.duration,
        });
        let last = self.active.len() - 1;
        &self.active[last]
    }

    /// Drop notifications that have expired at `now`; returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|n| !n.is_expired(now));
        before - self.active.len()
    }

    /// Notifications still visible, oldest first.
    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.active
    }
}
