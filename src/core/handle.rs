//! # ToastHandle: the renderer side of a mounted toast.
//!
//! Returned by [`Toaster::mount`](crate::Toaster::mount). The owning renderer
//! reads visibility and presence through it, may hold presence for an exit
//! transition, and unmounts the controller by dropping it.
//!
//! ## Rules
//! - Dropping the handle cancels the controller (pending timer included)
//! - [`unmount`](ToastHandle::unmount) does the same and waits for the cleanup
//! - Remounting the same identifier yields a fresh controller with its own timer

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        actor::Phase,
        config::ToastConfig,
        exit::{ExitGuard, ExitLatch},
        registry::Joined,
        store::NotificationStore,
    },
    error::ToastError,
};

/// Handle to one mounted toast controller.
pub struct ToastHandle {
    pub(crate) serial: u64,
    pub(crate) id: Arc<str>,
    pub(crate) store: NotificationStore,
    pub(crate) config: watch::Sender<ToastConfig>,
    pub(crate) phase: watch::Receiver<Phase>,
    pub(crate) exit: Arc<ExitLatch>,
    pub(crate) cancel: CancellationToken,
    pub(crate) joined: Joined,
}

impl ToastHandle {
    /// Identifier this controller observes.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Serial of the controller (unique per mount).
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Current configuration.
    pub fn config(&self) -> ToastConfig {
        self.config.borrow().clone()
    }

    /// Accessibility role the renderer should attach.
    pub fn role(&self) -> String {
        self.config.borrow().role.clone()
    }

    /// Replaces the configuration.
    ///
    /// A duration change while visible cancels the pending timer and arms a
    /// fresh one for the new duration.
    pub fn set_config(&self, cfg: ToastConfig) {
        self.config.send_if_modified(|current| {
            if *current == cfg {
                return false;
            }
            *current = cfg;
            true
        });
    }

    /// True iff the identifier is in the store's active set.
    pub fn is_requested_visible(&self) -> bool {
        self.store.contains(&self.id)
    }

    /// True while the renderer should keep the content attached.
    pub fn is_present(&self) -> bool {
        self.phase.borrow().is_present()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Receiver that observes every phase change of this controller.
    pub fn watch(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// Holds presence for an exit transition.
    ///
    /// Returns `None` unless the toast is currently visible. While any guard
    /// taken during a showing is alive, revoking visibility leaves the toast
    /// in [`Phase::Expiring`] (still present).
    pub fn hold_exit(&self) -> Option<ExitGuard> {
        self.exit.hold()
    }

    /// Cancels the controller and waits until its cleanup has run.
    pub async fn unmount(self) -> Result<(), ToastError> {
        let joined = self.joined.clone();
        let id = self.id.to_string();
        drop(self);

        if joined.await {
            Err(ToastError::ControllerPanicked { id })
        } else {
            Ok(())
        }
    }
}

impl Drop for ToastHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for ToastHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastHandle")
            .field("serial", &self.serial)
            .field("id", &self.id)
            .field("phase", &*self.phase.borrow())
            .finish()
    }
}
