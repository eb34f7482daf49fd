//! Session state for issued tokens.
//!
//! Provides a [`SessionStore`] trait with two implementations:
//! - [`RedisSessionStore`] - Production Redis-backed store
//! - [`MemorySessionStore`] - Process-local fallback and test store

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use service::{SessionError, SessionResult, SessionStore};
