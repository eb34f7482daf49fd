//! DTOs for registration, login and token endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::auth_service::{AuthenticatedUser, Registration};
use crate::application::services::token_service::TokenPair;
use crate::utils::validation::{USERNAME_REGEX, check_password_strength};

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 3, max = 50))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username may only contain letters, digits, '_' and '-'"
    ))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    #[validate(custom(function = "check_password_strength"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Strips surrounding whitespace before validation sees the value.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email.to_lowercase(),
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

/// Credentials for `POST /auth/login` (JSON) and `POST /auth/token` (form).
///
/// `username` accepts either the username or the e-mail address.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_verified: bool,
}

impl From<AuthenticatedUser> for LoginResponse {
    fn from(auth: AuthenticatedUser) -> Self {
        let AuthenticatedUser { user, tokens } = auth;
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "bearer",
            expires_at: tokens.expires_at,
            user_id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            is_verified: user.is_verified,
        }
    }
}

/// OAuth2 password-flow response of `POST /auth/token`.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Optional body of `POST /auth/logout`.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Token pair returned by `POST /auth/refresh`.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer",
            expires_at: pair.expires_at,
        }
    }
}
