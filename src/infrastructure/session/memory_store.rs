//! In-process session store.

use super::service::{SessionResult, SessionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Session store kept in process memory.
///
/// Used when Redis is not configured or unreachable at startup, and in tests.
/// Revocations are lost on restart and are not shared between instances.
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Instant>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        debug!("Using in-memory session store");
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|expires| **expires > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn revoke(&self, jti: &str, ttl: Duration) -> SessionResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, expires| *expires > now);
        entries.insert(jti.to_string(), now + ttl);

        debug!("Session REVOKE: {} (TTL: {}s)", jti, ttl.as_secs());
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> SessionResult<bool> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(jti)
            .is_some_and(|expires| *expires > Instant::now()))
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
