//! Transient status notifications.
//!
//! Fire-and-forget messages tagged with a severity. A notification stays
//! visible for a fixed window after it is raised, and can be dismissed
//! early. Nothing is persisted and there are no error paths.

// Allow dead code: presentation hooks for the interactive mode
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};

/// How long a notification stays visible before auto-dismissing.
const DISPLAY_DURATION_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// Short tag used when draining notifications to the terminal.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Success => "ok",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warn",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    created_at: DateTime<Utc>,
    dismissed: bool,
}

impl Notification {
    fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        !self.dismissed
            && now < self.created_at + Duration::milliseconds(DISPLAY_DURATION_MS)
    }
}

/// Queue of transient notifications.
#[derive(Debug, Default)]
pub struct Notifier {
    items: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a notification. Fire-and-forget; it will auto-dismiss.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.items.push(Notification {
            message: message.into(),
            severity,
            created_at: Utc::now(),
            dismissed: false,
        });
    }

    /// Currently visible notifications, pruning expired and dismissed ones.
    pub fn active(&mut self) -> Vec<Notification> {
        self.active_at(Utc::now())
    }

    fn active_at(&mut self, now: DateTime<Utc>) -> Vec<Notification> {
        self.items.retain(|n| n.is_visible_at(now));
        self.items.clone()
    }

    /// Dismiss the oldest visible notification early (user interaction).
    pub fn dismiss_front(&mut self) {
        if let Some(front) = self.items.iter_mut().find(|n| !n.dismissed) {
            front.dismissed = true;
        }
    }

    /// Remove and return everything raised so far, visible or not.
    /// Used by the command layer to flush messages before exit.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_visible_within_window() {
        let mut notifier = Notifier::new();
        notifier.notify("saved", Severity::Success);

        let now = Utc::now();
        let active = notifier.active_at(now);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "saved");
        assert_eq!(active[0].severity, Severity::Success);
    }

    #[test]
    fn test_notification_expires_after_display_window() {
        let mut notifier = Notifier::new();
        notifier.notify("old news", Severity::Info);

        let later = Utc::now() + Duration::milliseconds(DISPLAY_DURATION_MS + 1);
        assert!(notifier.active_at(later).is_empty());
        // Pruned, not just hidden
        assert!(notifier.items.is_empty());
    }

    #[test]
    fn test_early_dismiss() {
        let mut notifier = Notifier::new();
        notifier.notify("first", Severity::Warning);
        notifier.notify("second", Severity::Error);

        notifier.dismiss_front();
        let active = notifier.active_at(Utc::now());
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "second");
    }

    #[test]
    fn test_drain_empties_the_queue() {
        let mut notifier = Notifier::new();
        notifier.notify("a", Severity::Info);
        notifier.notify("b", Severity::Error);

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert!(notifier.active_at(Utc::now()).is_empty());
    }

    #[test]
    fn test_severity_tags() {
        assert_eq!(Severity::Success.tag(), "ok");
        assert_eq!(Severity::Error.tag(), "error");
        assert_eq!(Severity::Info.tag(), "info");
        assert_eq!(Severity::Warning.tag(), "warn");
    }
}
