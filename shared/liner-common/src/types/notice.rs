//! Deletion Notice

use serde::{Deserialize, Serialize};

/// Published to the TimeBomb channel so the companion service deletes a
/// message once `ttl` seconds have passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionNotice {
    pub channel: String,
    pub ts: String,
    pub ttl: i64,
}
