use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{
    config::ToasterConfig,
    registry::Registry,
    store::NotificationStore,
    toaster::{Toaster, subscriber_listener},
};
use crate::{
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Toaster`].
pub struct ToasterBuilder {
    cfg: ToasterConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ToasterBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: ToasterConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive toast events (shows, timers, presence changes)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the toaster.
    ///
    /// Must be called from within a tokio runtime: it spawns the subscriber
    /// workers and the registry listener.
    pub fn build(self) -> Toaster {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let store = NotificationStore::new(bus.clone());
        let subs = Arc::new(SubscriberSet::new(self.subscribers));
        let runtime_token = CancellationToken::new();

        subscriber_listener(&bus, Arc::clone(&subs));

        let registry = Registry::new(bus.clone(), runtime_token.clone());
        Arc::clone(&registry).spawn_listener();

        Toaster::new_internal(self.cfg, bus, store, subs, registry, runtime_token)
    }
}
