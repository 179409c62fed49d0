use std::collections::VecDeque;

use crate::domain::errors::ApiError;
use crate::domain::{Notification, NotificationLevel};

/// Queue of modal alerts; the front one is shown until acknowledged.
#[derive(Debug, Default)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
}

impl NotificationManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.queue
            .push_back(Notification::new(level, title, message));
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    /// Queues an error alert with the server message, or `fallback` without one.
    pub fn api_error(&mut self, error: &ApiError, fallback: &str) {
        self.error("Error", error.user_message(fallback));
    }

    /// Dismisses the alert on screen, revealing the next one.
    pub fn acknowledge(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_stays_until_acknowledged() {
        let mut manager = NotificationManager::new();

        manager.info("Saved", "Reminder added");
        assert_eq!(
            manager.current_notification().unwrap().message,
            "Reminder added"
        );
        assert_eq!(
            manager.current_notification().unwrap().message,
            "Reminder added"
        );

        let acknowledged = manager.acknowledge().unwrap();
        assert_eq!(acknowledged.title, "Saved");
        assert!(!manager.has_notifications());
    }

    #[test]
    fn test_queueing() {
        let mut manager = NotificationManager::new();
        manager.info("1", "First");
        manager.info("2", "Second");

        assert_eq!(manager.current_notification().unwrap().title, "1");
        manager.acknowledge();
        assert_eq!(manager.current_notification().unwrap().title, "2");
    }

    #[test]
    fn test_api_error_prefers_server_message() {
        let mut manager = NotificationManager::new();
        manager.api_error(
            &ApiError::server(400, Some("Title is required".to_string())),
            "Error saving application",
        );
        manager.api_error(&ApiError::server(500, None), "Delete failed");

        let first = manager.acknowledge().unwrap();
        assert_eq!(first.level, NotificationLevel::Error);
        assert_eq!(first.message, "Title is required");
        assert_eq!(manager.acknowledge().unwrap().message, "Delete failed");
    }
}
