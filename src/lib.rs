//! # toastvisor
//!
//! **Toastvisor** is a small runtime for ephemeral, identifier-keyed toast
//! notifications.
//!
//! It keeps the authoritative set of visible toasts, gives every rendered
//! identifier a controller with its own auto-dismiss timer, and exposes a
//! presence signal that outlives visibility long enough for a renderer to run
//! an exit animation. Rendering itself is left to the host UI.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   auth flow        page handler         any collaborator
//!       │                  │                     │
//!       └──── show(id) / close(id) / close_all() ┘
//!                          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Toaster (application root)                                       │
//! │  - NotificationStore (active set, watch snapshots)                │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! │  - Registry (mounted controllers by serial)                       │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ ToastActor   │   │ ToastActor   │   │ ToastActor   │
//!     │ "toast-error"│   │ "saved"      │   │ "saved"      │  (one per mount)
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘
//!      │ timer task       │ timer task       │ timer task
//!      ▼                  ▼                  ▼
//!   ToastHandle        ToastHandle        ToastHandle   ◄── renderer reads phase,
//!                                                           holds exit guards
//! ```
//!
//! ### Lifecycle
//! ```text
//! show(id) ──► store generation bump ──► ToastActor(id) observes snapshot
//!
//! Idle ──show──► Armed ──timer / close / close_all──► Expiring ──guards released──► Idle
//!                  ▲ └─show again: timer restarted        │
//!                  └──────────── show again ──────────────┘
//!
//! On unmount: timer cancelled, presence cleared, ControllerUnmounted published.
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                       |
//! |-------------------|-----------------------------------------------------------------|------------------------------------------|
//! | **Store**         | Authoritative active set with copy-on-write snapshots.          | [`NotificationStore`], [`ActiveSet`]     |
//! | **Controllers**   | Per-identifier timer + presence state machine.                  | [`ToastHandle`], [`Phase`], [`ExitGuard`]|
//! | **Runtime**       | Application root, mounting and shutdown.                        | [`Toaster`], [`ToasterBuilder`]          |
//! | **Subscriber API**| Hook into toast events (logging, announcements, custom).       | [`Subscribe`], [`SubscriberSet`]         |
//! | **Errors**        | Typed runtime errors.                                           | [`ToastError`]                           |
//! | **Configuration** | Per-toast duration/role and runtime settings.                  | [`ToastConfig`], [`ToasterConfig`]       |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] that records events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use toastvisor::{Phase, ToastConfig, Toaster, ToasterConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let toaster = Toaster::builder(ToasterConfig::default()).build();
//!
//!     // Renderer side: mount a controller for the identifier it draws.
//!     let toast = toaster
//!         .mount("toast-error", ToastConfig::default().with_role("alert"))
//!         .await?;
//!
//!     // Collaborator side: only the store handle is needed.
//!     let controls = toaster.controls();
//!     controls.show("toast-error");
//!     tokio::time::sleep(Duration::from_millis(10)).await;
//!     assert_eq!(toast.phase(), Phase::Armed);
//!
//!     controls.close("toast-error");
//!     tokio::time::sleep(Duration::from_millis(10)).await;
//!     assert!(!toast.is_present());
//!
//!     toaster.shutdown().await;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    ActiveSet, DEFAULT_DURATION_MS, DEFAULT_ROLE, ExitGuard, NotificationStore, Phase,
    ToastConfig, ToastHandle, Toaster, ToasterBuilder, ToasterConfig,
};
pub use error::ToastError;
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a built-in logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
