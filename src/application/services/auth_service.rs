//! Account registration, login and token lifecycle.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::token_service::{TokenPair, TokenService, TokenType};
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{dummy_hash, hash_password, verify_password};

/// Registration input after request validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub tokens: TokenPair,
}

/// Service for user accounts and the JWT session lifecycle.
///
/// Passwords are hashed with Argon2 on the blocking thread pool so request
/// workers are not stalled by the key derivation.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repository: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] ("Username or email already exists")
    /// if the username or e-mail is taken.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        if self
            .repository
            .exists_by_username_or_email(&registration.username, &registration.email)
            .await?
        {
            return Err(duplicate_user());
        }

        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() })))??;

        let new_user = NewUser {
            username: registration.username,
            email: registration.email,
            first_name: registration.first_name,
            last_name: registration.last_name,
            password_hash,
        };

        let user = self
            .repository
            .create(new_user)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration.
                AppError::Conflict { .. } => duplicate_user(),
                other => other,
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a token pair.
    ///
    /// `login` matches either the username or the e-mail address.
    ///
    /// Returns `Ok(None)` for an unknown user, a wrong password or an
    /// inactive account.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, AppError> {
        let user = self.repository.find_by_username_or_email(login).await?;

        // Unknown users still pay for one Argon2 verification.
        let candidate = password.to_string();
        let stored = user
            .as_ref()
            .map_or_else(|| dummy_hash().to_string(), |u| u.password_hash.clone());
        let valid = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored))
            .await
            .map_err(|e| AppError::internal("Password verification task failed", json!({ "reason": e.to_string() })))?;

        let Some(user) = user else {
            metrics::counter!("auth_login_failures_total").increment(1);
            return Ok(None);
        };

        if !valid || !user.is_active {
            metrics::counter!("auth_login_failures_total").increment(1);
            tracing::info!(user_id = %user.id, active = user.is_active, "Login rejected");
            return Ok(None);
        }

        self.repository.update_last_login(user.id).await?;
        let tokens = self.tokens.issue_pair(&user.id.to_string())?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Some(AuthenticatedUser { user, tokens }))
    }

    /// Resolves the user behind an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid, expired or
    /// revoked, or with "User not found" / "Inactive user" when the account
    /// no longer qualifies.
    pub async fn current_user(&self, access_token: &str) -> Result<User, AppError> {
        let claims = self
            .tokens
            .decode_token(access_token, TokenType::Access, true)
            .await?;

        self.load_active_user(&claims.sub).await
    }

    /// Exchanges a refresh token for a new pair and revokes the old one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .tokens
            .decode_token(refresh_token, TokenType::Refresh, true)
            .await?;

        let user = self.load_active_user(&claims.sub).await?;

        self.tokens.revoke(&claims).await?;
        self.tokens.issue_pair(&user.id.to_string())
    }

    /// Revokes the access token and, when given, the refresh token.
    ///
    /// An invalid refresh token is ignored so logout always succeeds for a
    /// valid access token.
    pub async fn logout(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        let access = self
            .tokens
            .decode_token(access_token, TokenType::Access, true)
            .await?;
        self.tokens.revoke(&access).await?;

        if let Some(token) = refresh_token {
            match self.tokens.decode_token(token, TokenType::Refresh, true).await {
                Ok(refresh) if refresh.sub == access.sub => self.tokens.revoke(&refresh).await?,
                Ok(_) => tracing::warn!("Refresh token subject does not match, not revoked"),
                Err(e) => tracing::debug!(error = %e, "Ignoring invalid refresh token on logout"),
            }
        }

        tracing::info!(user_id = %access.sub, "User logged out");
        Ok(())
    }

    /// Round-trips to the user store.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn load_active_user(&self, subject: &str) -> Result<User, AppError> {
        let user_id = Uuid::parse_str(subject)
            .map_err(|_| AppError::unauthorized("Could not validate credentials", json!({})))?;

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found", json!({})))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Inactive user", json!({})));
        }

        Ok(user)
    }
}

fn duplicate_user() -> AppError {
    AppError::bad_request("Username or email already exists", json!({}))
}
