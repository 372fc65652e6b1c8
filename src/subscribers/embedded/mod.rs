//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos and debugging.
//!
//! - [`LogWriter`]: records events as structured `tracing` events.

mod log;

pub use log::LogWriter;
