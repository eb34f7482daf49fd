//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`session`] - Revoked-token storage (Redis and in-memory)

pub mod persistence;
pub mod session;
