//! Wire Types

mod message;
mod notice;
mod reaction;

pub use message::{MessageMetadata, PostRequest, PostResult};
pub use notice::DeletionNotice;
pub use reaction::{ItemRef, ReactionRequest};
