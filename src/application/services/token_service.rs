//! JWT issuing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::session::SessionStore;

/// Which of the two token kinds a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// Registered and private claims carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    /// Unique token id, used as the revocation key.
    pub jti: String,
}

impl Claims {
    /// Time left until expiry, zero if already expired.
    pub fn remaining(&self) -> std::time::Duration {
        let secs = self.exp - Utc::now().timestamp();
        std::time::Duration::from_secs(secs.max(0) as u64)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Signing secrets and default lifetimes.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// An access/refresh pair returned on login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 tokens.
///
/// Access and refresh tokens are signed with different secrets, so a token
/// of one kind never verifies as the other. Revoked token ids are looked up
/// in the [`SessionStore`].
pub struct TokenService {
    settings: TokenSettings,
    sessions: Arc<dyn SessionStore>,
}

impl TokenService {
    pub fn new(settings: TokenSettings, sessions: Arc<dyn SessionStore>) -> Self {
        Self { settings, sessions }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    fn secret(&self, token_type: TokenType) -> &[u8] {
        match token_type {
            TokenType::Access => self.settings.access_secret.as_bytes(),
            TokenType::Refresh => self.settings.refresh_secret.as_bytes(),
        }
    }

    fn default_ttl(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.settings.access_ttl,
            TokenType::Refresh => self.settings.refresh_ttl,
        }
    }

    /// Lifetime of access tokens in seconds, used for the login cookie.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.settings.access_ttl.num_seconds()
    }

    /// Signs a token for `user_id`.
    ///
    /// `expires_delta` overrides the configured lifetime; a negative delta
    /// yields a token that is already expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] ("Could not create token") if encoding
    /// fails or the expiry is not a representable timestamp.
    pub fn create_token(
        &self,
        user_id: &str,
        token_type: TokenType,
        expires_delta: Option<Duration>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expires = expiry(now, expires_delta.unwrap_or_else(|| self.default_ttl(token_type)))?;

        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            exp: expires.timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().simple().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(token_type)),
        )
        .map_err(|e| AppError::internal("Could not create token", json!({ "reason": e.to_string() })))
    }

    /// Issues a fresh access/refresh pair.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair, AppError> {
        let access_token = self.create_token(user_id, TokenType::Access, None)?;
        let refresh_token = self.create_token(user_id, TokenType::Refresh, None)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at: expiry(Utc::now(), self.settings.access_ttl)?,
        })
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with one of:
    /// - "Token has expired"
    /// - "Invalid token type"
    /// - "Token has been revoked"
    /// - "Could not validate credentials" (bad signature, malformed token, wrong secret)
    pub async fn decode_token(
        &self,
        token: &str,
        expected: TokenType,
        verify_exp: bool,
    ) -> Result<Claims, AppError> {
        let claims = self.decode_unchecked(token, expected, verify_exp)?;

        match self.sessions.is_revoked(&claims.jti).await {
            Ok(true) => Err(AppError::unauthorized("Token has been revoked", json!({}))),
            Ok(false) => Ok(claims),
            Err(e) => {
                tracing::warn!(error = %e, "Revocation lookup failed, accepting token");
                Ok(claims)
            }
        }
    }

    /// Signature, expiry and type checks without the revocation lookup.
    fn decode_unchecked(
        &self,
        token: &str,
        expected: TokenType,
        verify_exp: bool,
    ) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = verify_exp;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret(expected)),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired", json!({})),
            _ => AppError::unauthorized("Could not validate credentials", json!({})),
        })?;

        if data.claims.token_type != expected {
            return Err(AppError::unauthorized("Invalid token type", json!({})));
        }

        Ok(data.claims)
    }

    /// Blacklists the token until its natural expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the session store rejects the write.
    pub async fn revoke(&self, claims: &Claims) -> Result<(), AppError> {
        let ttl = claims.remaining();
        if ttl.is_zero() {
            return Ok(());
        }

        self.sessions.revoke(&claims.jti, ttl).await.map_err(|e| {
            AppError::internal("Could not revoke token", json!({ "reason": e.to_string() }))
        })
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, AppError> {
    now.checked_add_signed(ttl).ok_or_else(|| {
        AppError::internal(
            "Could not create token",
            json!({ "reason": "token lifetime out of range" }),
        )
    })
}
