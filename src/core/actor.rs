//! # ToastActor: per-identifier lifecycle controller.
//!
//! Observes the store's visibility of one identifier, owns that identifier's
//! single-shot auto-dismiss timer and its presence phase.
//!
//! ## State machine
//! ```text
//!            show(id)                     close / close_all / timer
//!   Idle ───────────────► Armed ─────────────────────────────────► Expiring
//!    ▲                    │  ▲ show(id) again: timer re-armed        │
//!    │                    └──┘                                       │
//!    │               show(id) while expiring: back to Armed ◄────────┤
//!    └──────────────────── all exit guards released ◄────────────────┘
//! ```
//!
//! ## Architecture
//! ```text
//! ToastActor::run()
//! loop {
//!   ├─► deps = (generation(id), auto_dismiss)
//!   ├─► timer effect: deps changed → cancel old timer → arm new timer
//!   ├─► phase: visible → Armed, revoked → Expiring (→ Idle if no guards)
//!   └─► wait: cancelled | store changed | config changed | guards released
//! }
//! on exit: cancel timer → Idle → ControllerUnmounted
//! ```
//!
//! ## Rules
//! - At most **one** live timer per controller (the effect disposes before re-arming)
//! - Timers close through `NotificationStore::expire`, never closing a newer showing
//! - Every exit path cancels the pending timer (timer tokens are children of the actor token)
//! - Zero duration arms no timer; the toast stays `Armed` until closed

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Duration;

use tokio::{
    select,
    sync::watch,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::ToastConfig,
        effect::{Disposer, Effect},
        exit::{ExitLatch, ExitWaiter},
        store::NotificationStore,
    },
    events::{Bus, Event, EventKind},
};

/// Lifecycle phase of a mounted toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not requested visible, not present.
    #[default]
    Idle,
    /// Requested visible and present; auto-dismiss timer pending if configured.
    Armed,
    /// Visibility revoked; still present while the exit transition runs.
    Expiring,
}

impl Phase {
    /// True while a renderer should keep the content attached.
    #[inline]
    pub fn is_present(self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// Dependencies of the timer effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerDeps {
    generation: Option<u64>,
    delay: Option<Duration>,
}

/// What woke the actor loop.
enum Wake {
    Cancelled,
    Changed,
    Closed,
    ExitReleased,
}

/// Supervises the lifecycle of one toast identifier.
pub(crate) struct ToastActor {
    /// Serial distinguishing remounts of the same identifier.
    pub serial: u64,
    /// Store lookup key.
    pub id: Arc<str>,
    pub store: NotificationStore,
    pub bus: Bus,
    /// Presence projection read by the handle and the registry.
    pub phase: watch::Sender<Phase>,
    pub exit: Arc<ExitLatch>,
}

impl ToastActor {
    /// Runs until the token is cancelled or the handle's config sender is dropped.
    pub async fn run(self, mut config: watch::Receiver<ToastConfig>, token: CancellationToken) {
        let mut visibility = self.store.subscribe();
        let mut timer: Effect<TimerDeps> = Effect::new();
        let mut waiter: Option<ExitWaiter> = None;

        self.publish(EventKind::ControllerMounted);

        loop {
            let deps = TimerDeps {
                generation: visibility.borrow_and_update().generation(&self.id),
                delay: config.borrow_and_update().auto_dismiss(),
            };
            self.reconcile(&mut timer, &mut waiter, deps, &token);

            let expiring = *self.phase.borrow() == Phase::Expiring;
            let wake = select! {
                biased;
                _ = token.cancelled() => Wake::Cancelled,
                res = visibility.changed() => if res.is_ok() { Wake::Changed } else { Wake::Closed },
                res = config.changed() => if res.is_ok() { Wake::Changed } else { Wake::Closed },
                _ = exit_released(&mut waiter), if expiring => Wake::ExitReleased,
            };

            match wake {
                Wake::Changed => {}
                Wake::ExitReleased => self.finish_exit(&mut waiter),
                Wake::Cancelled | Wake::Closed => break,
            }
        }

        timer.dispose();
        self.exit.seal();
        self.set_phase(Phase::Idle);
        self.publish(EventKind::ControllerUnmounted);
    }

    /// One reconciliation pass against the latest store and config snapshots.
    fn reconcile(
        &self,
        timer: &mut Effect<TimerDeps>,
        waiter: &mut Option<ExitWaiter>,
        deps: TimerDeps,
        token: &CancellationToken,
    ) {
        timer.reconcile(deps, |d| {
            let generation = d.generation?;
            let delay = d.delay?;
            Some(self.arm_timer(generation, delay, token))
        });

        let phase = *self.phase.borrow();
        match (deps.generation, phase) {
            (Some(_), Phase::Idle | Phase::Expiring) => {
                *waiter = Some(self.exit.open());
                self.set_phase(Phase::Armed);
            }
            (Some(_), Phase::Armed) => {}
            (None, Phase::Armed) => {
                self.exit.seal();
                self.set_phase(Phase::Expiring);
                self.publish(EventKind::ExitStarted);
                if waiter.as_mut().is_none_or(ExitWaiter::is_released) {
                    self.finish_exit(waiter);
                }
            }
            (None, Phase::Idle | Phase::Expiring) => {}
        }
    }

    /// Spawns the single-shot timer for `generation`; the disposer cancels it.
    ///
    /// Firing and cancelling race for one `settled` flag, so exactly one of
    /// `TimerFired` or `TimerCancelled` is published per armed timer.
    fn arm_timer(&self, generation: u64, delay: Duration, parent: &CancellationToken) -> Disposer {
        let deadline = Instant::now() + delay;
        let timer_token = parent.child_token();
        let settled = Arc::new(AtomicBool::new(false));

        self.bus.publish(
            self.event(EventKind::TimerArmed)
                .with_generation(generation)
                .with_delay(delay),
        );

        {
            let token = timer_token.clone();
            let settled = Arc::clone(&settled);
            let store = self.store.clone();
            let bus = self.bus.clone();
            let id = Arc::clone(&self.id);
            let serial = self.serial;

            tokio::spawn(async move {
                select! {
                    biased;
                    _ = token.cancelled() => {}
                    _ = time::sleep_until(deadline) => {
                        if !settled.swap(true, AtomicOrdering::AcqRel) {
                            bus.publish(
                                controller_event(EventKind::TimerFired, &id, serial)
                                    .with_generation(generation),
                            );
                            store.expire(&id, generation);
                        }
                    }
                }
            });
        }

        let bus = self.bus.clone();
        let id = Arc::clone(&self.id);
        let serial = self.serial;
        Disposer::new(move || {
            timer_token.cancel();
            if !settled.swap(true, AtomicOrdering::AcqRel) {
                bus.publish(
                    controller_event(EventKind::TimerCancelled, &id, serial)
                        .with_generation(generation),
                );
            }
        })
    }

    fn finish_exit(&self, waiter: &mut Option<ExitWaiter>) {
        *waiter = None;
        self.set_phase(Phase::Idle);
        self.publish(EventKind::ExitCompleted);
    }

    fn set_phase(&self, next: Phase) {
        self.phase.send_if_modified(|phase| {
            if *phase == next {
                return false;
            }
            *phase = next;
            true
        });
    }

    fn event(&self, kind: EventKind) -> Event {
        controller_event(kind, &self.id, self.serial)
    }

    fn publish(&self, kind: EventKind) {
        self.bus.publish(self.event(kind));
    }
}

/// Stamps a controller event at the moment it is built.
fn controller_event(kind: EventKind, id: &Arc<str>, serial: u64) -> Event {
    Event::now(kind)
        .with_toast(Arc::clone(id))
        .with_controller(serial)
}

/// Completes when every exit guard of the current showing is gone.
async fn exit_released(waiter: &mut Option<ExitWaiter>) {
    match waiter {
        Some(waiter) => waiter.released().await,
        None => std::future::pending().await,
    }
}
