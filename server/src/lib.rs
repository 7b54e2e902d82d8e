//! `SlackLiner` Server
//!
//! Relays message and reaction requests from Redis lists and from an HTTP
//! endpoint to the Slack Web API, and hands TTL'd messages to TimeBomb for
//! deletion.

pub mod api;
pub mod config;
pub mod observability;
pub mod queue;
pub mod relay;
pub mod slack;
