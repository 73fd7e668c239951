//! In-app notification channel
//!
//! An explicit publish-subscribe object passed by reference to interested
//! components. Subscribers hold a receiver; disconnected subscribers are
//! pruned on the next publish. There is no module-level registry.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A user-facing notification
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Handle identifying a subscription; pass it back to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct ChannelInner {
    next_id: u64,
    subscribers: HashMap<u64, Sender<Notification>>,
}

/// Fan-out channel for notifications
pub struct NotificationChannel {
    inner: Mutex<ChannelInner>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ChannelInner {
                next_id: 0,
                subscribers: HashMap::new(),
            }),
        }
    }

    /// Register a subscriber; returns its id and the receiving end
    pub fn subscribe(&self) -> (SubscriberId, Receiver<Notification>) {
        let (tx, rx) = channel();
        let mut inner = self.inner.lock().expect("notification channel poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, tx);
        (SubscriberId(id), rx)
    }

    /// Remove a subscriber; a no-op if already removed
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut inner = self.inner.lock().expect("notification channel poisoned");
        inner.subscribers.remove(&id.0);
    }

    /// Deliver a notification to all live subscribers
    ///
    /// Subscribers whose receiver was dropped are pruned. Returns the number
    /// of subscribers that received the notification.
    pub fn publish(&self, notification: Notification) -> usize {
        let mut inner = self.inner.lock().expect("notification channel poisoned");
        let mut dead = Vec::new();
        let mut delivered = 0;

        for (id, tx) in &inner.subscribers {
            if tx.send(notification.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(*id);
            }
        }
        for id in dead {
            debug!(subscriber = id, "Pruning disconnected notification subscriber");
            inner.subscribers.remove(&id);
        }

        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .expect("notification channel poisoned")
            .subscribers
            .len()
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let channel = NotificationChannel::new();
        let (_id_a, rx_a) = channel.subscribe();
        let (_id_b, rx_b) = channel.subscribe();

        let delivered = channel.publish(
            Notification::new(NotificationKind::Success, "Saved")
                .with_description("Expense recorded"),
        );
        assert_eq!(delivered, 2);

        assert_eq!(rx_a.try_recv().unwrap().title, "Saved");
        assert_eq!(rx_b.try_recv().unwrap().kind, NotificationKind::Success);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let channel = NotificationChannel::new();
        let (id, rx) = channel.subscribe();
        channel.unsubscribe(id);

        let delivered = channel.publish(Notification::new(NotificationKind::Info, "hello"));
        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let channel = NotificationChannel::new();
        let (_id, rx) = channel.subscribe();
        drop(rx);

        assert_eq!(channel.subscriber_count(), 1);
        channel.publish(Notification::new(NotificationKind::Warning, "gone"));
        assert_eq!(channel.subscriber_count(), 0);
    }
}
