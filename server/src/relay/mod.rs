//! Relay Core
//!
//! Request validation and dispatch shared by the HTTP endpoint and the queue
//! consumers.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod validate;

pub use dispatch::Dispatcher;
pub use error::{RelayError, ValidationError};
pub use handlers::{MessageHandler, ReactionHandler};
