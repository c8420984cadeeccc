//! Process-wide tracing setup shared by the binaries.

/// Subscriber initialisation (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, init, init_with};
