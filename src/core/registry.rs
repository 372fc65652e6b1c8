//! # Controller registry - event-driven bookkeeping of mounted toasts.
//!
//! Registry owns the task handles of every mounted controller and listens to
//! the Bus to clean them up:
//! - Listens for `ControllerUnmounted` → joins the actor and drops its entry
//! - On listener lag → sweeps entries whose actor already finished
//!
//! ## Architecture
//! ```text
//! Toaster::mount() ──► Registry::spawn_actor() ──► tokio::spawn(ToastActor::run)
//!
//! Bus → Registry.event_listener()
//!         └─► ControllerUnmounted(serial) → cleanup(serial)
//! ```
//!
//! ## Rules
//! - Registry owns the join handles; handles own nothing but a cancellation token clone
//! - Entries are keyed by controller serial: several controllers may share an identifier
//! - Spawn and insert happen under one write lock, so cleanup never misses an entry

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::{RwLock, broadcast::error::RecvError, watch};
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::core::actor::{Phase, ToastActor};
use crate::core::config::ToastConfig;
use crate::events::{Bus, Event, EventKind};

/// Join outcome of a controller task, shared by the registry and the handle.
/// Resolves to `true` if the task panicked.
pub(crate) type Joined = Shared<BoxFuture<'static, bool>>;

/// Registry entry for one mounted controller.
struct Handle {
    id: Arc<str>,
    phase: watch::Receiver<Phase>,
    join: Joined,
    task: AbortHandle,
    cancel: CancellationToken,
}

/// Event-driven registry of mounted controllers.
pub(crate) struct Registry {
    controllers: RwLock<HashMap<u64, Handle>>,
    bus: Bus,
    runtime_token: CancellationToken,
}

impl Registry {
    /// Creates a new registry.
    pub fn new(bus: Bus, runtime_token: CancellationToken) -> Arc<Self> {
        Arc::new(Self {
            controllers: RwLock::new(HashMap::new()),
            bus,
            runtime_token,
        })
    }

    /// Spawns the cleanup listener. Call once during toaster build.
    pub fn spawn_listener(self: Arc<Self>) {
        let mut rx = self.bus.subscribe();
        let rt = self.runtime_token.clone();
        let me = self;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = rt.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => me.handle_event(&ev).await,
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "toast registry listener lagged; sweeping");
                            me.sweep_finished().await;
                        }
                    }
                }
            }
        });
    }

    async fn handle_event(&self, event: &Event) {
        if event.kind == EventKind::ControllerUnmounted {
            if let Some(serial) = event.controller {
                self.cleanup(serial).await;
            }
        }
    }

    /// Spawns `actor` under the given token and records it.
    ///
    /// Returns the join outcome so the handle can report a panic on unmount.
    pub async fn spawn_actor(
        &self,
        actor: ToastActor,
        config: watch::Receiver<ToastConfig>,
        cancel: CancellationToken,
    ) -> Joined {
        let serial = actor.serial;
        let id = Arc::clone(&actor.id);
        let phase = actor.phase.subscribe();

        let mut controllers = self.controllers.write().await;
        let task = tokio::spawn(actor.run(config, cancel.clone()));
        let abort = task.abort_handle();
        let join: Joined = task
            .map(|res| res.is_err_and(|err| err.is_panic()))
            .boxed()
            .shared();
        controllers.insert(
            serial,
            Handle {
                id,
                phase,
                join: join.clone(),
                task: abort,
                cancel,
            },
        );
        join
    }

    /// True if any mounted controller for `id` is present.
    pub async fn is_present(&self, id: &str) -> bool {
        self.controllers
            .read()
            .await
            .values()
            .any(|h| &*h.id == id && h.phase.borrow().is_present())
    }

    /// Returns sorted, deduplicated identifiers of mounted controllers.
    pub async fn mounted(&self) -> Vec<String> {
        let controllers = self.controllers.read().await;
        let mut ids: Vec<String> = controllers.values().map(|h| h.id.to_string()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Cancels every controller: cancel → join.
    pub async fn cancel_all(&self) {
        let handles: Vec<(u64, Handle)> = {
            let mut controllers = self.controllers.write().await;
            controllers.drain().collect()
        };

        for (_, h) in &handles {
            h.cancel.cancel();
        }

        for (serial, h) in handles {
            self.join_and_report(serial, &h.id, h.join).await;
        }
    }

    /// Joins a controller that announced its exit.
    async fn cleanup(&self, serial: u64) {
        let handle = self.controllers.write().await.remove(&serial);
        if let Some(h) = handle {
            self.join_and_report(serial, &h.id, h.join).await;
        }
    }

    /// Drops entries whose actor finished without us seeing the event.
    async fn sweep_finished(&self) {
        let finished: Vec<(u64, Handle)> = {
            let mut controllers = self.controllers.write().await;
            let serials: Vec<u64> = controllers
                .iter()
                .filter(|(_, h)| h.task.is_finished())
                .map(|(serial, _)| *serial)
                .collect();
            serials
                .into_iter()
                .filter_map(|serial| controllers.remove(&serial).map(|h| (serial, h)))
                .collect()
        };

        for (serial, h) in finished {
            self.join_and_report(serial, &h.id, h.join).await;
        }
    }

    /// Await join; report a panic as `ControllerPanicked`.
    async fn join_and_report(&self, serial: u64, id: &Arc<str>, join: Joined) {
        if join.await {
            tracing::warn!(toast = %id, serial, "toast controller panicked");
            self.bus.publish(
                Event::now(EventKind::ControllerPanicked)
                    .with_toast(Arc::clone(id))
                    .with_controller(serial)
                    .with_reason("controller_panic"),
            );
        }
    }
}
