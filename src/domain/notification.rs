use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Transient message shown over the current screen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub displayed_at: Option<Instant>,
    pub duration: Duration,
}

impl Notification {
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            displayed_at: None,
            duration: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Expired once shown for longer than its duration.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.displayed_at
            .is_some_and(|start| now.saturating_duration_since(start) > self.duration)
    }

    pub fn mark_displayed(&mut self, now: Instant) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(NotificationLevel::Error, "Cancel failed", "Try again");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.title, "Cancel failed");
        assert_eq!(n.duration, Duration::from_secs(5));
        assert!(n.displayed_at.is_none());
    }

    #[test]
    fn test_notification_expiry_starts_when_displayed() {
        let now = Instant::now();
        let mut n = Notification::new(NotificationLevel::Info, "Title", "Message")
            .with_duration(Duration::from_secs(2));

        assert!(!n.is_expired_at(now + Duration::from_secs(10)));

        n.mark_displayed(now);
        assert!(!n.is_expired_at(now + Duration::from_secs(1)));
        assert!(n.is_expired_at(now + Duration::from_secs(3)));
    }
}
