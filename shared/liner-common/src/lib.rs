//! `SlackLiner` Common Library
//!
//! Wire types shared by the relay server and by producers that enqueue work
//! for it.

pub mod types;

pub use types::*;
