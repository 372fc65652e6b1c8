//! # Exit holds: keep a toast present while its exit transition runs.
//!
//! While a toast is `Armed`, a renderer may take an [`ExitGuard`]. Once
//! visibility is revoked the controller enters `Expiring` and keeps presence
//! true until every guard of that showing is gone.
//!
//! ```text
//! Armed:     open() ─► latch holds Sender ─► hold() clones it into guards
//! Expiring:  seal() ─► latch drops its Sender
//!            waiter resolves when the last guard drops (channel disconnected)
//! ```
//!
//! Nothing is ever sent on the channel; only the sender count matters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Keeps a toast present until dropped.
///
/// Obtained from [`ToastHandle::hold_exit`](crate::ToastHandle::hold_exit)
/// while the toast is visible. Drop it (or call [`release`](Self::release))
/// when the exit transition has finished.
#[derive(Debug)]
#[must_use = "dropping the guard releases the exit hold immediately"]
pub struct ExitGuard {
    _hold: mpsc::Sender<()>,
}

impl ExitGuard {
    /// Releases the hold.
    pub fn release(self) {}
}

/// Shared between a controller and its handle.
#[derive(Debug, Default)]
pub(crate) struct ExitLatch {
    slot: Mutex<Option<mpsc::Sender<()>>>,
}

impl ExitLatch {
    /// Starts a showing; guards taken from now on belong to the returned waiter.
    pub(crate) fn open(&self) -> ExitWaiter {
        let (tx, rx) = mpsc::channel(1);
        *self.lock() = Some(tx);
        ExitWaiter { rx }
    }

    /// Stops handing out guards for the current showing.
    pub(crate) fn seal(&self) {
        self.lock().take();
    }

    /// Takes a guard if a showing is open.
    pub(crate) fn hold(&self) -> Option<ExitGuard> {
        self.lock()
            .as_ref()
            .map(|tx| ExitGuard { _hold: tx.clone() })
    }

    fn lock(&self) -> MutexGuard<'_, Option<mpsc::Sender<()>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves once the latch is sealed and all guards are dropped.
#[derive(Debug)]
pub(crate) struct ExitWaiter {
    rx: mpsc::Receiver<()>,
}

impl ExitWaiter {
    /// Non-blocking check.
    pub(crate) fn is_released(&mut self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    pub(crate) async fn released(&mut self) {
        while self.rx.recv().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_latch_without_guards_is_released() {
        let latch = ExitLatch::default();
        let mut waiter = latch.open();
        assert!(!waiter.is_released());
        latch.seal();
        assert!(waiter.is_released());
    }

    #[test]
    fn guard_delays_release() {
        let latch = ExitLatch::default();
        let mut waiter = latch.open();
        let guard = latch.hold();
        assert!(guard.is_some());
        latch.seal();
        assert!(!waiter.is_released());
        drop(guard);
        assert!(waiter.is_released());
    }

    #[test]
    fn no_guard_after_seal() {
        let latch = ExitLatch::default();
        let _waiter = latch.open();
        latch.seal();
        assert!(latch.hold().is_none());
    }

    #[test]
    fn reopen_detaches_previous_guards() {
        let latch = ExitLatch::default();
        let _first = latch.open();
        let old_guard = latch.hold();
        let mut second = latch.open();
        latch.seal();
        assert!(second.is_released());
        drop(old_guard);
    }

    #[tokio::test]
    async fn released_future_completes_on_last_drop() {
        let latch = ExitLatch::default();
        let mut waiter = latch.open();
        let a = latch.hold();
        let b = latch.hold();
        latch.seal();

        drop(a);
        assert!(!waiter.is_released());
        if let Some(b) = b {
            b.release();
        }
        waiter.released().await;
    }
}
