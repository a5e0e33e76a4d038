//! Broadcast channel for session changes.
//!
//! Built on `tokio::sync::broadcast`. Publishing with no subscribers is a no-op.

use tokio::sync::broadcast;

/// Default number of buffered notifications per subscriber.
const DEFAULT_CAPACITY: usize = 16;

/// Payload-less signal that the session token was stored or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthChanged;

/// Multi-consumer channel for [`AuthChanged`] notifications.
///
/// Cloning shares the underlying sender, so a clone handed to the UI layer
/// observes notifications fired by the client.
#[derive(Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthChanged>,
}

impl AuthEvents {
    /// Creates a channel with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a channel buffering up to `capacity` notifications per subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to all future notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChanged> {
        self.sender.subscribe()
    }

    /// Fires one notification to every current subscriber.
    pub fn notify(&self) {
        let _ = self.sender.send(AuthChanged);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEvents")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn test_notify_reaches_every_subscriber() {
        let events = AuthEvents::new();
        let mut ui = events.subscribe();
        let mut guard = events.clone().subscribe();

        events.notify();

        assert_eq!(ui.recv().await.unwrap(), AuthChanged);
        assert_eq!(guard.recv().await.unwrap(), AuthChanged);
        assert_eq!(events.subscriber_count(), 2);
    }

    #[test]
    fn test_notify_without_subscribers_is_a_no_op() {
        let events = AuthEvents::default();
        events.notify();
        events.notify();
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_notifications() {
        let events = AuthEvents::new();
        events.notify();

        let mut rx = events.subscribe();
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
