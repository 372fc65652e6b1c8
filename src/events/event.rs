//! # Events emitted by the store and the toast controllers.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Store events**: membership changes of the active set (shown, closed, all closed)
//! - **Controller events**: mount/unmount of a per-identifier controller
//! - **Lifecycle events**: timer and presence transitions of a mounted controller
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the toast
//! identifier, the controller serial, and timer delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use toastvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::TimerArmed)
//!     .with_toast("toast-error")
//!     .with_controller(7)
//!     .with_delay(Duration::from_millis(3500));
//!
//! assert_eq!(ev.kind, EventKind::TimerArmed);
//! assert_eq!(ev.toast.as_deref(), Some("toast-error"));
//! assert_eq!(ev.delay_ms, Some(3500));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Store events ===
    /// An identifier was shown (added, or re-shown with a fresh generation).
    ///
    /// Sets:
    /// - `toast`: identifier
    /// - `generation`: show generation assigned by the store
    ToastShown,

    /// An identifier was removed from the active set.
    ///
    /// Sets:
    /// - `toast`: identifier
    /// - `reason`: `"close"` or `"expired"`
    ToastClosed,

    /// The active set was cleared.
    ///
    /// Sets:
    /// - `reason`: number of identifiers removed
    AllClosed,

    // === Controller events ===
    /// A controller was mounted for an identifier.
    ///
    /// Sets:
    /// - `toast`: identifier
    /// - `controller`: controller serial
    ControllerMounted,

    /// A controller finished its cleanup and exited.
    ///
    /// Sets:
    /// - `toast`: identifier
    /// - `controller`: controller serial
    ControllerUnmounted,

    /// A controller task panicked (reported when it is joined).
    ///
    /// Sets:
    /// - `toast`: identifier
    /// - `controller`: controller serial
    /// - `reason`: `"controller_panic"`
    ControllerPanicked,

    // === Lifecycle events ===
    /// An auto-dismiss timer was armed.
    ///
    /// Sets:
    /// - `toast`, `controller`, `generation`
    /// - `delay_ms`: auto-dismiss delay
    TimerArmed,

    /// An auto-dismiss timer elapsed and requested the close.
    ///
    /// Sets:
    /// - `toast`, `controller`, `generation`
    TimerFired,

    /// A pending auto-dismiss timer was cancelled before it elapsed.
    ///
    /// Sets:
    /// - `toast`, `controller`, `generation`
    TimerCancelled,

    /// Visibility was revoked; presence is held for the exit transition.
    ///
    /// Sets:
    /// - `toast`, `controller`
    ExitStarted,

    /// The exit transition finished; presence cleared.
    ///
    /// Sets:
    /// - `toast`, `controller`
    ExitCompleted,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Toast identifier, if applicable.
    pub toast: Option<Arc<str>>,
    /// Serial of the controller that emitted the event.
    pub controller: Option<u64>,
    /// Show generation the event refers to.
    pub generation: Option<u64>,
    /// Timer delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason.
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            toast: None,
            controller: None,
            generation: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a toast identifier.
    #[inline]
    pub fn with_toast(mut self, toast: impl Into<Arc<str>>) -> Self {
        self.toast = Some(toast.into());
        self
    }

    /// Attaches a controller serial.
    #[inline]
    pub fn with_controller(mut self, serial: u64) -> Self {
        self.controller = Some(serial);
        self
    }

    /// Attaches a show generation.
    #[inline]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Attaches a timer delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for events that change the active set.
    #[inline]
    pub fn is_store_change(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ToastShown | EventKind::ToastClosed | EventKind::AllClosed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::now(EventKind::ToastShown);
        let b = Event::now(EventKind::ToastClosed);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn delay_is_clamped_to_u32() {
        let ev = Event::now(EventKind::TimerArmed).with_delay(Duration::from_secs(u64::MAX));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }

    #[test]
    fn store_change_classification() {
        assert!(Event::now(EventKind::AllClosed).is_store_change());
        assert!(!Event::now(EventKind::TimerFired).is_store_change());
    }
}
