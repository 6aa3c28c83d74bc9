//! Notification center
//!
//! Short status toasts that dismiss themselves after a fixed number of
//! ticks. Fire-and-forget: once pushed, a notification cannot be
//! cancelled, only expire.

/// Ticks a notification stays on screen (at 4 ticks/second)
const NOTIFICATION_TTL: u32 = 16;
/// At most this many toasts are kept; oldest drop first
const MAX_NOTIFICATIONS: usize = 4;

/// Severity, used only for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// One on-screen toast
#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub level: NotifyLevel,
    ticks_left: u32,
}

/// Holds the active toasts and expires them on tick
#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a toast with the standard lifetime
    pub fn push(&mut self, text: impl Into<String>, level: NotifyLevel) {
        let text = text.into();
        log::debug!("Notification: {}", text);
        self.items.push(Notification {
            text,
            level,
            ticks_left: NOTIFICATION_TTL,
        });
        if self.items.len() > MAX_NOTIFICATIONS {
            self.items.remove(0);
        }
    }

    /// Advance one tick, dropping expired toasts
    pub fn tick(&mut self) {
        for item in &mut self.items {
            item.ticks_left = item.ticks_left.saturating_sub(1);
        }
        self.items.retain(|item| item.ticks_left > 0);
    }

    /// Active toasts, oldest first
    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_expire() {
        let mut center = NotificationCenter::new();
        center.push("saved", NotifyLevel::Success);
        for _ in 0..NOTIFICATION_TTL {
            center.tick();
        }
        assert!(center.items().is_empty());
    }

    #[test]
    fn test_oldest_dropped_at_capacity() {
        let mut center = NotificationCenter::new();
        for i in 0..6 {
            center.push(format!("toast {}", i), NotifyLevel::Info);
        }
        assert_eq!(center.items().len(), MAX_NOTIFICATIONS);
        assert_eq!(center.items()[0].text, "toast 2");
    }
}
