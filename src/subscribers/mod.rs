//! # Event subscribers for the toast runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and built-in implementations for handling events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   NotificationStore / ToastActor ── publish(Event) ──► Bus ──► subscriber listener
//!                                                                      │
//!                                                          SubscriberSet::emit(&Event)
//!                                                               ┌──────┴──────┐
//!                                                               ▼             ▼
//!                                                           LogWriter   Custom (impl Subscribe)
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, accessibility announcements)
//! - **Stateful subscribers** - keep their own view of toast history
//!
//! Enable the `logging` feature to get the built-in `LogWriter`.

#[cfg(feature = "logging")]
mod embedded;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
