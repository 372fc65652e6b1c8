//! Toast events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the store, the toast controllers and
//! their timers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `NotificationStore`, `ToastActor`, timer tasks, `Registry` (panics).
//! - **Consumers**: the toaster's subscriber listener (fans out to `SubscriberSet`)
//!   and `Registry` (its own cleanup listener).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
