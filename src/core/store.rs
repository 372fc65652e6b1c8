//! # Notification store: the authoritative active set.
//!
//! Holds which identifiers are currently requested visible. Every write
//! replaces the published [`ActiveSet`] snapshot and wakes all observers.
//!
//! ## Architecture
//! ```text
//! collaborators ──► show / close / close_all ──► watch::Sender<ActiveSet>
//!                                                     │
//!                             ┌───────────────────────┼───────────────────┐
//!                             ▼                       ▼                   ▼
//!                        ToastActor "a"          ToastActor "b"      renderer borrow()
//! ```
//!
//! ## Rules
//! - Identifiers are unique (map keys); insertion order is not meaningful
//! - Every `show` assigns a fresh **generation** (the store revision at that write),
//!   even when the identifier is already present
//! - `close` / `close_all` only notify when membership changed
//! - Snapshots are copy-on-write: a snapshot held by a reader never changes
//! - The store knows nothing about timers, controllers or rendering

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;

use crate::events::{Bus, Event, EventKind};

/// Immutable snapshot of the active set.
///
/// Maps each active identifier to the generation of its latest `show`.
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    entries: Arc<HashMap<String, u64>>,
    revision: u64,
}

impl ActiveSet {
    /// True if `id` is requested visible.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Generation of the latest `show(id)`, if `id` is active.
    pub fn generation(&self, id: &str) -> Option<u64> {
        self.entries.get(id).copied()
    }

    /// Number of active identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no identifier is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store revision this snapshot was taken at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns sorted list of active identifiers.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

/// Process-wide notification state, passed by handle.
///
/// Cheap to clone; all clones share the same active set. This is the handle
/// collaborators keep to call [`show`](Self::show), [`close`](Self::close) and
/// [`close_all`](Self::close_all).
#[derive(Clone, Debug)]
pub struct NotificationStore {
    tx: Arc<watch::Sender<ActiveSet>>,
    bus: Bus,
}

impl NotificationStore {
    /// Creates an empty store publishing change events to `bus`.
    pub fn new(bus: Bus) -> Self {
        let (tx, _rx) = watch::channel(ActiveSet::default());
        Self {
            tx: Arc::new(tx),
            bus,
        }
    }

    /// Requests `id` to be visible.
    ///
    /// Adds `id` if absent; if present, only its generation changes. Always
    /// produces a new snapshot so mounted controllers re-arm their timers.
    pub fn show(&self, id: impl Into<String>) {
        let id = id.into();
        let mut generation = 0;
        self.tx.send_modify(|set| {
            set.revision += 1;
            generation = set.revision;
            Arc::make_mut(&mut set.entries).insert(id.clone(), generation);
        });

        self.bus.publish(
            Event::now(EventKind::ToastShown)
                .with_toast(id)
                .with_generation(generation),
        );
    }

    /// Removes `id` from the active set; no-op if absent.
    pub fn close(&self, id: &str) {
        if self.remove_if(id, |_| true) {
            self.bus.publish(
                Event::now(EventKind::ToastClosed)
                    .with_toast(id)
                    .with_reason("close"),
            );
        }
    }

    /// Empties the active set unconditionally.
    pub fn close_all(&self) {
        let mut removed = 0;
        self.tx.send_if_modified(|set| {
            removed = set.entries.len();
            if removed == 0 {
                return false;
            }
            set.revision += 1;
            set.entries = Arc::new(HashMap::new());
            true
        });

        if removed > 0 {
            self.bus.publish(
                Event::now(EventKind::AllClosed).with_reason(format!("removed={removed}")),
            );
        }
    }

    /// Closes `id` only if its current generation is `generation`.
    ///
    /// Used by auto-dismiss timers: a timer armed for an older showing never
    /// closes a newer one.
    pub(crate) fn expire(&self, id: &str, generation: u64) -> bool {
        let removed = self.remove_if(id, |current| current == generation);
        if removed {
            self.bus.publish(
                Event::now(EventKind::ToastClosed)
                    .with_toast(id)
                    .with_generation(generation)
                    .with_reason("expired"),
            );
        }
        removed
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> ActiveSet {
        self.tx.borrow().clone()
    }

    /// True if `id` is currently requested visible.
    pub fn contains(&self, id: &str) -> bool {
        self.tx.borrow().contains(id)
    }

    /// Generation of the latest `show(id)`, if `id` is active.
    pub fn generation(&self, id: &str) -> Option<u64> {
        self.tx.borrow().generation(id)
    }

    /// Creates a receiver observing every subsequent snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ActiveSet> {
        self.tx.subscribe()
    }

    fn remove_if(&self, id: &str, keep_going: impl FnOnce(u64) -> bool) -> bool {
        self.tx.send_if_modified(|set| match set.entries.get(id) {
            Some(&generation) if keep_going(generation) => {
                set.revision += 1;
                Arc::make_mut(&mut set.entries).remove(id);
                true
            }
            _ => false,
        })
    }
}
