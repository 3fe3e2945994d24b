//! Notification delivery.
//!
//! Core operations report recoverable failures and successes through a
//! [`NotificationSink`] instead of returning errors. [`NotificationBus`] is
//! the broadcast implementation used by the application layer.

use studymate_types::notification::Notification;
use tokio::sync::broadcast;

/// Receiver of user-facing notices.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Multi-consumer notification bus.
///
/// Wraps a `tokio::sync::broadcast` channel. Cloning the bus clones the
/// sender. Publishing with no active subscribers is a no-op.
#[derive(Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future notices.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl NotificationSink for NotificationBus {
    fn notify(&self, notification: Notification) {
        tracing::debug!(severity = %notification.severity, message = %notification.message, "notification");
        self.publish(notification);
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

/// Collect every notice already queued on `receiver`, oldest first.
pub fn drain(receiver: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut drained = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(notification) => drained.push(notification),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notification receiver lagged");
            }
            Err(_) => break,
        }
    }
    drained
}
