//! Transient success/error banner state with an auto-dismiss deadline.

use std::time::{Duration, Instant};

pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

#[derive(Debug, Clone)]
struct Visible {
    notification: Notification,
    deadline: Instant,
}

/// Holds at most one visible notification. The deadline lives and dies with the
/// notification it belongs to, so replacing, dismissing or dropping the banner
/// leaves no timer behind.
#[derive(Debug, Clone)]
pub struct NotificationBanner {
    duration: Duration,
    visible: Option<Visible>,
}

impl Default for NotificationBanner {
    fn default() -> Self {
        Self::new(NOTIFICATION_DURATION)
    }
}

impl NotificationBanner {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            visible: None,
        }
    }

    /// Shows `notification`, restarting the timer. An empty message hides the banner.
    pub fn show(&mut self, notification: Notification, now: Instant) {
        if notification.message.is_empty() {
            self.visible = None;
            return;
        }
        self.visible = Some(Visible {
            notification,
            deadline: now + self.duration,
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.visible.as_ref().map(|visible| &visible.notification)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.is_some()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.visible.take().map(|visible| visible.notification)
    }

    /// Dismisses the notification once its deadline has passed. Returns the
    /// dismissed notification the one time this happens.
    pub fn tick(&mut self, now: Instant) -> Option<Notification> {
        match &self.visible {
            Some(visible) if now >= visible.deadline => self.dismiss(),
            _ => None,
        }
    }

    /// Time left before auto-dismiss, for scheduling the next repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.visible
            .as_ref()
            .map(|visible| visible.deadline.saturating_duration_since(now))
    }
}
