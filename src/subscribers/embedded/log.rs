//! # LogWriter — structured event logger
//!
//! A minimal subscriber that records incoming [`Event`]s through `tracing`.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output
//! ```text
//! INFO toastvisor: shown toast="toast-error" generation=3
//! DEBUG toastvisor: timer armed toast="toast-error" controller=1 delay_ms=3500
//! DEBUG toastvisor: timer fired toast="toast-error" controller=1
//! INFO toastvisor: closed toast="toast-error" reason="expired"
//! DEBUG toastvisor: exit completed toast="toast-error" controller=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let toast = e.toast.as_deref().unwrap_or("");
        let controller = e.controller.unwrap_or_default();
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::ToastShown => {
                tracing::info!(target: "toastvisor", toast, generation = e.generation, "shown");
            }
            EventKind::ToastClosed => {
                tracing::info!(target: "toastvisor", toast, reason, "closed");
            }
            EventKind::AllClosed => {
                tracing::info!(target: "toastvisor", reason, "all closed");
            }
            EventKind::ControllerMounted => {
                tracing::debug!(target: "toastvisor", toast, controller, "mounted");
            }
            EventKind::ControllerUnmounted => {
                tracing::debug!(target: "toastvisor", toast, controller, "unmounted");
            }
            EventKind::ControllerPanicked => {
                tracing::error!(target: "toastvisor", toast, controller, reason, "controller panicked");
            }
            EventKind::TimerArmed => {
                tracing::debug!(target: "toastvisor", toast, controller, delay_ms = e.delay_ms, "timer armed");
            }
            EventKind::TimerFired => {
                tracing::debug!(target: "toastvisor", toast, controller, "timer fired");
            }
            EventKind::TimerCancelled => {
                tracing::debug!(target: "toastvisor", toast, controller, "timer cancelled");
            }
            EventKind::ExitStarted => {
                tracing::debug!(target: "toastvisor", toast, controller, "exit started");
            }
            EventKind::ExitCompleted => {
                tracing::debug!(target: "toastvisor", toast, controller, "exit completed");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handles_every_kind_without_a_subscriber_installed() {
        let writer = LogWriter::new();
        for kind in [
            EventKind::ToastShown,
            EventKind::ToastClosed,
            EventKind::AllClosed,
            EventKind::ControllerMounted,
            EventKind::ControllerUnmounted,
            EventKind::ControllerPanicked,
            EventKind::TimerArmed,
            EventKind::TimerFired,
            EventKind::TimerCancelled,
            EventKind::ExitStarted,
            EventKind::ExitCompleted,
        ] {
            writer.on_event(&Event::now(kind).with_toast("a")).await;
        }
        assert_eq!(writer.name(), "LogWriter");
    }
}
