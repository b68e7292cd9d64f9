//! Alert-class notifications raised by sessions for the host to display.
//!
//! Notifications are transient: the host drains them, shows them once,
//! and nothing is kept afterwards.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Severity level for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn with_level(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Error, message)
    }
}

/// A bounded FIFO of pending notifications.
///
/// When full, the oldest entry is dropped to make room.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(8)
    }
}
