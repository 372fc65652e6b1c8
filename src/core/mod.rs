//! Runtime core: store, controllers and lifecycle.
//!
//! The public API from this module is [`Toaster`] (application root),
//! [`NotificationStore`] (collaborator controls), [`ToastHandle`] (renderer side)
//! and their configuration types.
//!
//! Internal modules:
//! - [`store`]: authoritative active set with copy-on-write snapshots;
//! - [`effect`]: dependency-keyed registration/disposer pairs;
//! - [`actor`]: per-identifier controller (timer + presence state machine);
//! - [`exit`]: exit holds keeping presence during exit transitions;
//! - [`registry`]: bookkeeping of mounted controllers;
//! - [`toaster`]: runtime root wiring everything together.

mod actor;
mod builder;
mod config;
mod effect;
mod exit;
mod handle;
mod registry;
mod store;
mod toaster;

pub use actor::Phase;
pub use builder::ToasterBuilder;
pub use config::{DEFAULT_DURATION_MS, DEFAULT_ROLE, ToastConfig, ToasterConfig};
pub use exit::ExitGuard;
pub use handle::ToastHandle;
pub use store::{ActiveSet, NotificationStore};
pub use toaster::Toaster;
