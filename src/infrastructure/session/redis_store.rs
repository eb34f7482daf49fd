//! Redis-backed session store.

use super::service::{SessionError, SessionResult, SessionStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, info};

/// Redis session store shared by every service instance.
///
/// Revoked token ids are stored as `blacklist:<jti>` with a TTL so Redis
/// expires them together with the token. Reads are fail-open: a Redis error
/// is logged and reported as "not revoked".
pub struct RedisSessionStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> SessionResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "blacklist:".to_string(),
        })
    }

    fn build_key(&self, jti: &str) -> String {
        format!("{}{}", self.key_prefix, jti)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn revoke(&self, jti: &str, ttl: Duration) -> SessionResult<()> {
        let key = self.build_key(jti);
        let mut conn = self.client.clone();
        // SET EX rejects 0, and a zero TTL means the token is already dead.
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(&key, 1, ttl_seconds)
            .await
            .map_err(|e| SessionError::OperationError(format!("Redis SET failed: {}", e)))?;

        debug!("Session REVOKE: {} (TTL: {}s)", jti, ttl_seconds);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> SessionResult<bool> {
        let key = self.build_key(jti);
        let mut conn = self.client.clone();

        match conn.exists::<_, bool>(&key).await {
            Ok(revoked) => Ok(revoked),
            Err(e) => {
                error!("Redis EXISTS error for {}: {}", jti, e);
                Ok(false)
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
