//! # Dependency-keyed effects.
//!
//! An [`Effect`] remembers the dependency value it was last registered with.
//! Reconciling with a different value first runs the previous [`Disposer`],
//! then registers again; an equal value is a no-op.
//!
//! ```text
//! reconcile(d1) → register(d1) ─► disposer#1
//! reconcile(d1) → (unchanged)
//! reconcile(d2) → disposer#1() → register(d2) ─► disposer#2
//! drop(effect)  → disposer#2()
//! ```
//!
//! ## Rules
//! - The previous disposer always runs **before** the next registration
//! - At most one disposer is pending at any time
//! - Dropping the effect runs the pending disposer

/// Cleanup returned by an effect registration.
pub(crate) struct Disposer(Box<dyn FnOnce() + Send>);

impl Disposer {
    pub(crate) fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    fn run(self) {
        (self.0)()
    }
}

/// Registration keyed by a dependency value.
pub(crate) struct Effect<D> {
    deps: Option<D>,
    disposer: Option<Disposer>,
}

impl<D: PartialEq> Effect<D> {
    pub(crate) fn new() -> Self {
        Self {
            deps: None,
            disposer: None,
        }
    }

    /// Re-registers if `deps` changed; returns `true` when it did.
    pub(crate) fn reconcile<F>(&mut self, deps: D, register: F) -> bool
    where
        F: FnOnce(&D) -> Option<Disposer>,
    {
        if self.deps.as_ref() == Some(&deps) {
            return false;
        }
        self.dispose();
        self.disposer = register(&deps);
        self.deps = Some(deps);
        true
    }

    /// Runs the pending disposer, if any.
    pub(crate) fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer.run();
        }
    }
}

impl<D> Drop for Effect<D> {
    fn drop(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer.run();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    type Log = Arc<Mutex<Vec<String>>>;

    fn registrar(log: &Log) -> impl Fn(&u32) -> Option<Disposer> + '_ {
        move |d: &u32| {
            let d = *d;
            log.lock().map(|mut l| l.push(format!("register {d}"))).ok();
            let log = Arc::clone(log);
            Some(Disposer::new(move || {
                log.lock().map(|mut l| l.push(format!("dispose {d}"))).ok();
            }))
        }
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    #[test]
    fn unchanged_deps_do_not_reregister() {
        let log: Log = Arc::default();
        let mut effect = Effect::new();
        assert!(effect.reconcile(1, registrar(&log)));
        assert!(!effect.reconcile(1, registrar(&log)));
        assert_eq!(entries(&log), vec!["register 1"]);
    }

    #[test]
    fn disposer_runs_before_next_registration() {
        let log: Log = Arc::default();
        let mut effect = Effect::new();
        effect.reconcile(1, registrar(&log));
        effect.reconcile(2, registrar(&log));
        assert_eq!(entries(&log), vec!["register 1", "dispose 1", "register 2"]);
    }

    #[test]
    fn drop_runs_pending_disposer() {
        let log: Log = Arc::default();
        {
            let mut effect = Effect::new();
            effect.reconcile(7, registrar(&log));
        }
        assert_eq!(entries(&log), vec!["register 7", "dispose 7"]);
    }

    #[test]
    fn dispose_is_one_shot() {
        let log: Log = Arc::default();
        let mut effect = Effect::new();
        effect.reconcile(3, registrar(&log));
        effect.dispose();
        effect.dispose();
        drop(effect);
        assert_eq!(entries(&log), vec!["register 3", "dispose 3"]);
    }

    #[test]
    fn registration_may_skip_disposer() {
        let mut effect: Effect<Option<u32>> = Effect::new();
        assert!(effect.reconcile(None, |_| None));
        assert!(effect.reconcile(Some(1), |_| None));
        effect.dispose();
    }
}
