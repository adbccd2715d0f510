//! Non-blocking user notifications ("toasts") raised while loading the
//! catalog.
//!
//! A [`Notifier`] belongs to one view and lives as long as that view. Its
//! "already shown" set is never shared, so a second view (or a remount)
//! starts with a clean slate.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    /// Dedupe key, e.g. `"source-failed:shopify"`.
    pub key: String,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Notifier {
    shown: HashSet<String>,
    pending: Vec<Notification>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification unless one with the same key was already shown
    /// by this notifier. Returns `true` when queued.
    pub fn notify_once(
        &mut self,
        level: NotificationLevel,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> bool {
        let key = key.into();
        if !self.shown.insert(key.clone()) {
            return false;
        }
        self.pending.push(Notification {
            level,
            key,
            message: message.into(),
            at: Utc::now(),
        });
        true
    }

    /// Notifications not yet taken by the view.
    #[must_use]
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Hands queued notifications to the view. Keys stay remembered.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Allows `key` to be shown again, e.g. after a successful retry.
    pub fn forget(&mut self, key: &str) {
        self.shown.remove(key);
    }
}
