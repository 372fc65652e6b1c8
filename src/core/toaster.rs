//! # Toaster: application root of the notification runtime.
//!
//! The [`Toaster`] owns the [`NotificationStore`], the event bus, the
//! [`SubscriberSet`] and the registry of mounted controllers. It is created once
//! by the application root and passed by reference (or `Arc`) to collaborators
//! and renderers; there is no global instance.
//!
//! ## Key responsibilities
//! - hand out the store handle to collaborators (`show` / `close` / `close_all`)
//! - mount one controller per rendered identifier ([`Toaster::mount`])
//! - answer visibility/presence queries by identifier
//! - subscribe to the [`Bus`] and **fan-out** events via [`SubscriberSet`]
//! - cancel and join every controller on [`Toaster::shutdown`]
//!
//! ## High-level architecture
//! ```text
//! collaborators ──► Toaster::show/close/close_all ──► NotificationStore (watch)
//!                                                          │ snapshot
//! renderer ──► Toaster::mount(id, cfg) ──► Registry ──► ToastActor(id) ──► timer task
//!    ▲                                                     │
//!    └──── ToastHandle (phase / presence / exit guards) ◄──┘
//!
//! Event flow:
//!   store / actors / timers ── publish(Event) ──► Bus ──► subscriber listener ──► SubscriberSet
//!                                                   └──► Registry listener (cleanup)
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use toastvisor::{ToastConfig, Toaster, ToasterConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let toaster = Toaster::builder(ToasterConfig::default()).build();
//!
//!     let toast = toaster
//!         .mount("toast-error", ToastConfig::default().with_duration(Duration::from_millis(50)))
//!         .await?;
//!
//!     toaster.show("toast-error");
//!     assert!(toaster.is_requested_visible("toast-error"));
//!
//!     tokio::time::sleep(Duration::from_millis(100)).await;
//!     assert!(!toaster.is_requested_visible("toast-error"));
//!
//!     toast.unmount().await?;
//!     toaster.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        actor::{Phase, ToastActor},
        builder::ToasterBuilder,
        config::{ToastConfig, ToasterConfig},
        exit::ExitLatch,
        handle::ToastHandle,
        registry::Registry,
        store::NotificationStore,
    },
    error::ToastError,
    events::{Bus, Event},
    subscribers::SubscriberSet,
};

/// Coordinates the store, the mounted controllers and event delivery.
pub struct Toaster {
    cfg: ToasterConfig,
    bus: Bus,
    store: NotificationStore,
    subs: Arc<SubscriberSet>,
    registry: Arc<Registry>,
    runtime_token: CancellationToken,
    next_serial: AtomicU64,
}

impl Toaster {
    /// Returns a builder for a toaster with the given configuration.
    pub fn builder(cfg: ToasterConfig) -> ToasterBuilder {
        ToasterBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: ToasterConfig,
        bus: Bus,
        store: NotificationStore,
        subs: Arc<SubscriberSet>,
        registry: Arc<Registry>,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            store,
            subs,
            registry,
            runtime_token,
            next_serial: AtomicU64::new(1),
        }
    }

    /// Runtime configuration.
    pub fn config(&self) -> &ToasterConfig {
        &self.cfg
    }

    /// Store handle for collaborators that only show and dismiss toasts.
    pub fn controls(&self) -> NotificationStore {
        self.store.clone()
    }

    /// Requests `id` to be visible (re-arms its timers if already visible).
    pub fn show(&self, id: impl Into<String>) {
        self.store.show(id);
    }

    /// Dismisses `id`; no-op if not visible.
    pub fn close(&self, id: &str) {
        self.store.close(id);
    }

    /// Dismisses every toast.
    pub fn close_all(&self) {
        self.store.close_all();
    }

    /// True iff `id` is in the active set.
    pub fn is_requested_visible(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    /// True if any controller mounted for `id` keeps it present.
    pub async fn is_present(&self, id: &str) -> bool {
        self.registry.is_present(id).await
    }

    /// Sorted identifiers of currently mounted controllers.
    pub async fn mounted(&self) -> Vec<String> {
        self.registry.mounted().await
    }

    /// Number of subscribers receiving events.
    pub fn subscriber_count(&self) -> usize {
        self.subs.len()
    }

    /// Raw receiver of every event published from now on.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// True once [`shutdown`](Self::shutdown) was called.
    pub fn is_shut_down(&self) -> bool {
        self.runtime_token.is_cancelled()
    }

    /// Mounts a controller for `id`.
    ///
    /// The controller arms immediately if `id` is already visible. Dropping
    /// the returned handle unmounts it.
    pub async fn mount(
        &self,
        id: impl Into<String>,
        config: ToastConfig,
    ) -> Result<ToastHandle, ToastError> {
        if self.runtime_token.is_cancelled() {
            return Err(ToastError::ShutDown);
        }

        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        let id: Arc<str> = Arc::from(id.into());
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);
        let (config_tx, config_rx) = watch::channel(config);
        let exit = Arc::new(ExitLatch::default());
        let cancel = self.runtime_token.child_token();

        let actor = ToastActor {
            serial,
            id: Arc::clone(&id),
            store: self.store.clone(),
            bus: self.bus.clone(),
            phase: phase_tx,
            exit: Arc::clone(&exit),
        };
        let joined = self
            .registry
            .spawn_actor(actor, config_rx, cancel.clone())
            .await;

        Ok(ToastHandle {
            serial,
            id,
            store: self.store.clone(),
            config: config_tx,
            phase: phase_rx,
            exit,
            cancel,
            joined,
        })
    }

    /// Mounts a controller for `id` with the toaster's default toast config.
    pub async fn mount_default(&self, id: impl Into<String>) -> Result<ToastHandle, ToastError> {
        self.mount(id, self.cfg.toast.clone()).await
    }

    /// Cancels and joins every mounted controller; later mounts fail.
    pub async fn shutdown(&self) {
        self.runtime_token.cancel();
        self.registry.cancel_all().await;
    }
}

/// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
pub(crate) fn subscriber_listener(bus: &Bus, set: Arc<SubscriberSet>) {
    if set.is_empty() {
        return;
    }
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "toast subscriber listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time;

    use super::*;
    use crate::events::EventKind;
    use crate::subscribers::Subscribe;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn toaster() -> Toaster {
        Toaster::builder(ToasterConfig::default()).build()
    }

    async fn settle() {
        time::sleep(ms(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn timer_rearms_on_repeated_show() {
        let t = toaster();
        let _toast = t.mount("a", ToastConfig::from_millis(1000)).await;

        t.show("a");
        time::sleep(ms(900)).await;
        t.show("a");
        time::sleep(ms(900)).await;
        assert!(t.is_requested_visible("a"), "timer must restart on second show");

        time::sleep(ms(200)).await;
        assert!(!t.is_requested_visible("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_close_cancels_timer() {
        let t = toaster();
        let mut events = t.events();
        let _toast = t.mount("a", ToastConfig::from_millis(1000)).await;

        t.show("a");
        time::sleep(ms(200)).await;
        t.close("a");
        time::sleep(ms(1000)).await;

        assert!(!t.is_requested_visible("a"));
        let kinds: Vec<EventKind> = std::iter::from_fn(|| events.try_recv().ok())
            .map(|e| e.kind)
            .collect();
        assert!(kinds.contains(&EventKind::TimerCancelled));
        assert!(!kinds.contains(&EventKind::TimerFired));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_never_closes_a_later_show() {
        let t = toaster();
        let _toast = t.mount("a", ToastConfig::from_millis(1000)).await;

        t.show("a");
        time::sleep(ms(200)).await;
        t.close("a");
        time::sleep(ms(300)).await;
        t.show("a");

        // The first showing's deadline (t=1000) passes; the second runs to t=1500.
        time::sleep(ms(700)).await;
        assert!(t.is_requested_visible("a"));
        time::sleep(ms(400)).await;
        assert!(!t.is_requested_visible("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn close_all_resets_every_controller() {
        let t = toaster();
        let a = t.mount("a", ToastConfig::from_millis(1000)).await;
        let b = t.mount("b", ToastConfig::from_millis(1000)).await;
        let (Ok(a), Ok(b)) = (a, b) else {
            panic!("mount failed");
        };

        t.show("a");
        t.show("b");
        settle().await;
        assert!(a.is_present() && b.is_present());

        let mut events = t.events();
        t.close_all();
        settle().await;
        assert!(t.controls().snapshot().is_empty());
        assert_eq!(a.phase(), Phase::Idle);
        assert_eq!(b.phase(), Phase::Idle);
        assert!(!t.is_present("a").await);

        time::sleep(ms(2000)).await;
        let kinds: Vec<EventKind> = std::iter::from_fn(|| events.try_recv().ok())
            .map(|e| e.kind)
            .collect();
        let cancelled = kinds.iter().filter(|k| **k == EventKind::TimerCancelled).count();
        assert_eq!(cancelled, 2);
        assert!(!kinds.contains(&EventKind::TimerFired));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_stays_until_closed() {
        let t = toaster();
        let toast = t.mount("a", ToastConfig::from_millis(0)).await.ok();

        t.show("a");
        time::sleep(Duration::from_secs(3600)).await;
        assert!(t.is_requested_visible("a"));
        assert!(toast.as_ref().is_some_and(ToastHandle::is_present));

        t.close("a");
        settle().await;
        assert!(!t.is_present("a").await);
    }

    #[tokio::test(start_paused = true)]
    async fn visibility_flips_before_presence() {
        let t = toaster();
        let toast = t.mount("a", ToastConfig::default()).await;
        let Ok(toast) = toast else {
            panic!("mount failed");
        };

        t.show("a");
        settle().await;

        t.close("a");
        // Store state is synchronous; the controller reacts on its next turn.
        assert!(!toast.is_requested_visible());
        assert!(toast.is_present());

        settle().await;
        assert!(!toast.is_present());
    }

    #[tokio::test(start_paused = true)]
    async fn exit_hold_keeps_presence_after_close() {
        let t = toaster();
        let Ok(toast) = t.mount("a", ToastConfig::from_millis(500)).await else {
            panic!("mount failed");
        };

        t.show("a");
        settle().await;
        let guard = toast.hold_exit();
        assert!(guard.is_some());

        time::sleep(ms(600)).await;
        assert!(!t.is_requested_visible("a"));
        assert_eq!(toast.phase(), Phase::Expiring);
        assert!(t.is_present("a").await);

        drop(guard);
        settle().await;
        assert_eq!(toast.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_pending_timer() {
        let t = toaster();
        let Ok(toast) = t.mount("a", ToastConfig::from_millis(1000)).await else {
            panic!("mount failed");
        };
        t.show("a");
        settle().await;

        assert_eq!(toast.unmount().await, Ok(()));
        time::sleep(ms(2000)).await;
        assert!(t.is_requested_visible("a"));
        assert!(t.mounted().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn remount_gets_fresh_controller() {
        let t = toaster();
        let first = t.mount("a", ToastConfig::from_millis(1000)).await;
        let second = t.mount("a", ToastConfig::from_millis(1000)).await;
        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("mount failed");
        };
        assert_ne!(first.serial(), second.serial());
        assert_eq!(t.mounted().await, vec!["a".to_string()]);

        t.show("a");
        settle().await;
        drop(first);
        settle().await;
        assert!(second.is_present());
        assert!(t.is_present("a").await);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_refuses_new_mounts() {
        let t = toaster();
        let _toast = t.mount_default("a").await;
        t.show("a");
        settle().await;

        t.shutdown().await;
        assert!(t.is_shut_down());
        assert!(t.mounted().await.is_empty());
        assert_eq!(
            t.mount_default("b").await.map(|h| h.serial()),
            Err(ToastError::ShutDown)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn mount_default_uses_toaster_defaults() {
        let cfg = ToasterConfig {
            toast: ToastConfig::from_millis(42).with_role("alert"),
            ..ToasterConfig::default()
        };
        let t = Toaster::builder(cfg).build();
        let Ok(toast) = t.mount_default("a").await else {
            panic!("mount failed");
        };
        assert_eq!(toast.config().duration_ms, 42);
        assert_eq!(toast.role(), "alert");
    }

    struct Recorder(Arc<Mutex<Vec<EventKind>>>);

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(event.kind);
            }
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_observe_lifecycle() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let t = Toaster::builder(ToasterConfig::default())
            .with_subscribers(vec![Arc::new(Recorder(Arc::clone(&seen))) as Arc<dyn Subscribe>])
            .build();
        assert_eq!(t.subscriber_count(), 1);

        let _toast = t.mount("a", ToastConfig::from_millis(100)).await;
        t.show("a");
        time::sleep(ms(200)).await;

        let seen = seen.lock().map(|s| s.clone()).unwrap_or_default();
        for kind in [
            EventKind::ControllerMounted,
            EventKind::ToastShown,
            EventKind::TimerArmed,
            EventKind::TimerFired,
            EventKind::ToastClosed,
            EventKind::ExitCompleted,
        ] {
            assert!(seen.contains(&kind), "missing {kind:?} in {seen:?}");
        }
    }
}
