//! # Event bus for broadcasting toast events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from multiple sources (store, controllers, timers).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                   Listeners:
//!   NotificationStore ──┐
//!   ToastActor 1 ───────┼──────► Bus ──┬──► subscriber listener ──► SubscriberSet
//!   ToastActor N ───────┤              └──► Registry listener (cleanup)
//!   timer tasks ────────┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it calls `broadcast::Sender::send`.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no active subscribers at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for toast events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately (send clones internally).
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// Capacity is **shared** across all receivers; the minimum is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn publish_reaches_every_receiver() {
        let bus = Bus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(Event::now(EventKind::ToastShown).with_toast("a"));

        assert_eq!(a.recv().await.map(|e| e.kind).ok(), Some(EventKind::ToastShown));
        assert_eq!(b.recv().await.map(|e| e.kind).ok(), Some(EventKind::ToastShown));
    }

    #[test]
    fn publish_without_receivers_is_silent() {
        let bus = Bus::new(0);
        bus.publish(Event::now(EventKind::AllClosed));
    }
}
