//! # Example: sign_in_toast
//!
//! A sign-in form surfaces a `"toast-error"` notification whenever a login
//! attempt fails, while a renderer keeps the toast attached long enough to play
//! its exit transition.
//!
//! Demonstrates how to:
//! - Build a `Toaster` with the built-in `LogWriter` subscriber.
//! - Hand collaborators the store handle (`controls()`), nothing else.
//! - Mount a renderer-side controller and follow its presence phases.
//! - Hold presence with an `ExitGuard` during a fake exit animation.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► renderer task: mount("toast-error") → watch phase → hold exit guard
//!   └─► sign-in task:  failed login → show("toast-error")
//!                      failed again → show("toast-error")  (timer restarts)
//!
//! timer elapses → Expiring → guard released after 300ms → Idle
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=toastvisor=debug cargo run --example sign_in_toast --features logging
//! ```

use std::{sync::Arc, time::Duration};

use toastvisor::{LogWriter, NotificationStore, Phase, Subscribe, ToastConfig, Toaster, ToasterConfig};
use tracing_subscriber::EnvFilter;

const TOAST_ID: &str = "toast-error";

/// Stand-in for a credential check that always rejects.
async fn sign_in(controls: &NotificationStore, attempt: u32) {
    tokio::time::sleep(Duration::from_millis(200)).await;
    tracing::info!(attempt, "invalid credentials");
    controls.show(TOAST_ID);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toastvisor=debug,info")),
        )
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let toaster = Toaster::builder(ToasterConfig::default())
        .with_subscribers(subs)
        .build();

    let toast = toaster
        .mount(TOAST_ID, ToastConfig::from_millis(1500).with_role("alert"))
        .await?;

    let renderer = {
        let mut phase = toast.watch();
        let mut guard = None;
        let hold = move || toast.hold_exit();
        tokio::spawn(async move {
            while phase.changed().await.is_ok() {
                let current = *phase.borrow_and_update();
                tracing::info!(?current, "render");
                match current {
                    Phase::Armed => guard = guard.take().or_else(&hold),
                    Phase::Expiring => {
                        // Fake exit animation.
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        if let Some(g) = guard.take() {
                            g.release();
                        }
                    }
                    Phase::Idle => break,
                }
            }
        })
    };

    let controls = toaster.controls();
    sign_in(&controls, 1).await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    sign_in(&controls, 2).await;

    renderer.await?;
    tracing::info!(visible = toaster.is_requested_visible(TOAST_ID), "done");

    toaster.shutdown().await;
    Ok(())
}
