//! Toast notifications
//!
//! A bounded queue of messages; each one dismisses itself after the
//! configured timeout.

use std::collections::VecDeque;
use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::components::Toast;
use crate::models::ConsoleConfig;
use crate::utils::timer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn toast_type(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    /// Appends a message and drops the oldest ones beyond `max_visible`.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, max_visible: usize) -> u64 {
        self.next_id += 1;
        self.items.push_back(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        while self.items.len() > max_visible.max(1) {
            self.items.pop_front();
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct NotificationCenter {
    queue: Signal<NotificationQueue>,
    config: Signal<ConsoleConfig>,
}

impl NotificationCenter {
    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.queue.read().items().cloned().collect()
    }

    fn push(&self, kind: NotificationKind, message: String) {
        let (timeout_secs, max_visible) = {
            let config = self.config.read();
            (config.notifications.timeout_secs, config.notifications.max_visible)
        };
        tracing::debug!(?kind, "notification: {message}");

        let mut queue = self.queue;
        let id = queue.write().push(kind, message, max_visible);
        spawn_forever(async move {
            timer::sleep(Duration::from_secs(timeout_secs)).await;
            queue.write().dismiss(id);
        });
    }
}

/// Installs the notification center; requires the configuration context.
pub fn use_notifications_provider(config: Signal<ConsoleConfig>) -> NotificationCenter {
    use_context_provider(|| NotificationCenter {
        queue: Signal::new(NotificationQueue::default()),
        config,
    })
}

pub fn use_notifications() -> NotificationCenter {
    use_context::<NotificationCenter>()
}

/// Renders the live notifications in the top-right corner.
#[component]
pub fn ToastStack() -> Element {
    let center = use_notifications();
    let items = center.snapshot();

    rsx! {
        div { class: "fixed top-4 right-4 z-50 space-y-2 w-80",
            "aria-live": "polite",
            for item in items {
                Toast {
                    key: "{item.id}",
                    message: item.message.clone(),
                    toast_type: item.kind.toast_type().to_string(),
                    ondismiss: move |_| center.dismiss(item.id),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_keeps_most_recent() {
        let mut queue = NotificationQueue::default();
        for index in 0..4 {
            queue.push(NotificationKind::Info, format!("message {index}"), 3);
        }
        let messages: Vec<&str> = queue.items().map(|item| item.message.as_str()).collect();
        assert_eq!(messages, vec!["message 1", "message 2", "message 3"]);
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut queue = NotificationQueue::default();
        let first = queue.push(NotificationKind::Success, "saved", 5);
        let second = queue.push(NotificationKind::Error, "failed", 5);
        assert_ne!(first, second);

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.items().next().map(|item| item.kind), Some(NotificationKind::Error));
    }

    #[test]
    fn test_zero_capacity_still_shows_latest() {
        let mut queue = NotificationQueue::default();
        queue.push(NotificationKind::Info, "a", 0);
        queue.push(NotificationKind::Info, "b", 0);
        assert_eq!(queue.len(), 1);
        assert!(!queue.is_empty());
    }
}
