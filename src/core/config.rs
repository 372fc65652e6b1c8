//! # Toast and toaster configuration.
//!
//! Provides [`ToastConfig`], the per-notification settings a renderer mounts a
//! controller with, and [`ToasterConfig`], the settings of the runtime root.
//!
//! ## Sentinel values
//! - `duration_ms = 0` → auto-dismiss disabled (treated as `None` by [`ToastConfig::auto_dismiss`])
//! - negative durations passed to [`ToastConfig::from_millis`] → normalized to `0`

use std::time::Duration;

/// Default auto-dismiss duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 3500;

/// Default accessibility role attached to rendered toasts.
pub const DEFAULT_ROLE: &str = "status";

/// Per-notification configuration.
///
/// ## Field semantics
/// - `duration_ms`: auto-dismiss delay (`0` = never auto-dismiss)
/// - `role`: accessibility role the renderer attaches to the content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastConfig {
    /// Auto-dismiss delay in milliseconds.
    ///
    /// - `0` = stays visible until an explicit `close` / `close_all`
    /// - `> 0` = single-shot timer armed on every show
    pub duration_ms: u64,

    /// Accessibility role, opaque to the runtime.
    pub role: String,
}

impl ToastConfig {
    /// Builds a config from a signed millisecond count.
    ///
    /// Negative values are a caller contract violation and normalize to `0`
    /// (auto-dismiss disabled) instead of failing.
    ///
    /// # Example
    /// ```
    /// use toastvisor::ToastConfig;
    ///
    /// assert_eq!(ToastConfig::from_millis(-5).duration_ms, 0);
    /// assert_eq!(ToastConfig::from_millis(1000).duration_ms, 1000);
    /// ```
    pub fn from_millis(ms: i64) -> Self {
        Self {
            duration_ms: u64::try_from(ms).unwrap_or(0),
            ..Self::default()
        }
    }

    /// Sets the auto-dismiss duration (millisecond precision).
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Sets the accessibility role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Returns the auto-dismiss delay as an `Option`.
    ///
    /// - `None` → no timer, the toast stays until closed
    /// - `Some(d)` → timer armed for `d` on every show
    #[inline]
    pub fn auto_dismiss(&self) -> Option<Duration> {
        if self.duration_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.duration_ms))
        }
    }
}

impl Default for ToastConfig {
    /// Default configuration:
    ///
    /// - `duration_ms = 3500`
    /// - `role = "status"`
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Configuration of the [`Toaster`](crate::Toaster) runtime root.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `toast`: defaults used by [`Toaster::mount_default`](crate::Toaster::mount_default)
#[derive(Clone, Debug)]
pub struct ToasterConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow listeners that lag behind more than `bus_capacity` events will
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Default per-toast configuration.
    pub toast: ToastConfig,
}

impl ToasterConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for ToasterConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `toast = ToastConfig::default()`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            toast: ToastConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ToastConfig::default();
        assert_eq!(cfg.duration_ms, 3500);
        assert_eq!(cfg.role, "status");
        assert_eq!(cfg.auto_dismiss(), Some(Duration::from_millis(3500)));
    }

    #[test]
    fn zero_duration_disables_auto_dismiss() {
        let cfg = ToastConfig::default().with_duration(Duration::ZERO);
        assert_eq!(cfg.auto_dismiss(), None);
    }

    #[test]
    fn negative_duration_normalizes_to_zero() {
        let cfg = ToastConfig::from_millis(-1);
        assert_eq!(cfg.duration_ms, 0);
        assert_eq!(cfg.auto_dismiss(), None);
        assert_eq!(cfg.role, DEFAULT_ROLE);
    }

    #[test]
    fn builder_overrides_role() {
        let cfg = ToastConfig::from_millis(1000).with_role("alert");
        assert_eq!(cfg.role, "alert");
        assert_eq!(cfg.duration_ms, 1000);
    }

    #[test]
    fn bus_capacity_is_clamped() {
        let cfg = ToasterConfig {
            bus_capacity: 0,
            ..ToasterConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
