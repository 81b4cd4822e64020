//! Tracing/logging setup shared by the simplebank binaries.

/// Initialize process-wide logging with an `info` default filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init_with_default("info");
}

pub use subscriber::{LogFormat, init_with_default};

/// Subscriber configuration (filters, output format).
pub mod subscriber;
