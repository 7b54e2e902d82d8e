//! Observability
//!
//! Structured JSON logging for the relay.

mod tracing;

pub use self::tracing::init_tracing;
