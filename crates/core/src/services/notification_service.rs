use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::models::notification::Notification;

/// Fan-out channel for user-facing notifications.
///
/// Each subscriber owns its receiver; dropping it ends the subscription and
/// the sender is pruned on the next publish.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<UnboundedSender<Notification>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<Notification> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber. Returns how many received it.
    pub fn publish(&mut self, notification: Notification) -> usize {
        self.subscribers
            .retain(|tx| tx.unbounded_send(notification.clone()).is_ok());
        self.subscribers.len()
    }

    /// Number of subscribers whose receiver is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }
}
