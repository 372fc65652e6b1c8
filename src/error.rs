//! Error types used by the toast runtime.
//!
//! The notification operations themselves (`show`, `close`, `close_all`) are
//! total and never fail. [`ToastError`] only covers the runtime around them:
//! mounting on a stopped toaster and controllers that died abnormally.
//!
//! Like the other runtime types, it provides `as_label` / `as_message` helpers
//! for logs.

use thiserror::Error;

/// # Errors produced by the toast runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToastError {
    /// The toaster was shut down; no new controllers can be mounted.
    #[error("toaster is shut down")]
    ShutDown,

    /// A controller task panicked instead of finishing its cleanup.
    #[error("controller for toast {id:?} panicked")]
    ControllerPanicked {
        /// Identifier the controller was mounted for.
        id: String,
    },
}

impl ToastError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use toastvisor::ToastError;
    ///
    /// assert_eq!(ToastError::ShutDown.as_label(), "toaster_shut_down");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ToastError::ShutDown => "toaster_shut_down",
            ToastError::ControllerPanicked { .. } => "controller_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ToastError::ShutDown => "toaster is shut down; mount refused".to_string(),
            ToastError::ControllerPanicked { id } => {
                format!("controller panicked; toast={id}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(ToastError::ShutDown.as_label(), "toaster_shut_down");
        let err = ToastError::ControllerPanicked { id: "a".into() };
        assert_eq!(err.as_label(), "controller_panicked");
        assert_eq!(err.to_string(), "controller for toast \"a\" panicked");
        assert!(err.as_message().contains("toast=a"));
    }
}
