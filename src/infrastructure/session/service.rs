//! Session store trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur while talking to the session backend.
#[derive(Debug)]
pub enum SessionError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Session store connection error: {}", e),
            Self::OperationError(e) => write!(f, "Session store operation error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Storage for revoked token identifiers (`jti` claims).
///
/// A revoked entry only needs to outlive the token it blocks, so every entry
/// carries a TTL equal to the token's remaining lifetime.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::RedisSessionStore`] - Redis-backed, shared between instances
/// - [`crate::infrastructure::session::MemorySessionStore`] - process-local fallback
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Marks `jti` as revoked for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OperationError`] if the entry could not be written.
    async fn revoke(&self, jti: &str, ttl: Duration) -> SessionResult<()>;

    /// Returns true if `jti` has been revoked and the entry has not expired.
    ///
    /// Implementations treat backend failures as "not revoked" and log them.
    async fn is_revoked(&self, jti: &str) -> SessionResult<bool>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health output.
    fn backend(&self) -> &'static str;
}
