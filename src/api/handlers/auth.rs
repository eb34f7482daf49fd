//! Handlers for registration, login, token refresh and logout.

use axum::{
    Extension, Form, Json,
    body::Bytes,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{
    AccessTokenResponse, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest,
    RegisterRequest, TokenPairResponse,
};
use crate::api::dto::user::UserResponse;
use crate::api::middleware::{BearerToken, CurrentUser};
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the access token for HTML pages.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// {
///   "first_name": "Test",
///   "last_name": "User",
///   "email": "test@example.com",
///   "username": "testuser",
///   "password": "SecurePass123!",
///   "confirm_password": "SecurePass123!"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the username or e-mail is taken
/// - 422 for missing fields or failed validation
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state.auth_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Logs in with a JSON body and returns a token pair.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// Also sets an HttpOnly `access_token` cookie so the HTML dashboard can
/// authenticate page loads.
///
/// # Errors
///
/// 401 "Invalid username or password" for bad credentials or inactive accounts.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let auth = state
        .auth_service
        .authenticate(payload.username.trim(), &payload.password)
        .await?
        .ok_or_else(invalid_credentials)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        access_cookie(
            &auth.tokens.access_token,
            state.tokens().access_ttl_seconds(),
            state.cookie_secure,
        )?,
    );

    Ok((headers, Json(LoginResponse::from(auth))))
}

/// OAuth2 password flow with a form body.
///
/// # Endpoint
///
/// `POST /auth/token` (`application/x-www-form-urlencoded`, fields `username`, `password`)
pub async fn token_handler(
    State(state): State<AppState>,
    payload: Result<Form<LoginRequest>, FormRejection>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let Form(payload) = payload.map_err(|e| {
        AppError::validation("Invalid form body", json!({ "reason": e.body_text() }))
    })?;
    payload.validate()?;

    let auth = state
        .auth_service
        .authenticate(payload.username.trim(), &payload.password)
        .await?
        .ok_or_else(invalid_credentials)?;

    Ok(Json(AccessTokenResponse {
        access_token: auth.tokens.access_token,
        token_type: "bearer",
    }))
}

/// Exchanges a refresh token for a new pair.
///
/// # Endpoint
///
/// `POST /auth/refresh`
///
/// The submitted refresh token is revoked; reusing it fails with 401.
pub async fn refresh_handler(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let pair = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(pair.into()))
}

/// Revokes the current access token (and optionally a refresh token).
///
/// # Endpoint
///
/// `POST /auth/logout` (Bearer), optional body `{"refresh_token": "..."}`
///
/// Responds `204 No Content` and clears the `access_token` cookie.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request: LogoutRequest = if body.is_empty() {
        LogoutRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            AppError::validation("Invalid logout body", json!({ "reason": e.to_string() }))
        })?
    };

    state
        .auth_service
        .logout(&token, request.refresh_token.as_deref())
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, access_cookie("", 0, state.cookie_secure)?);

    Ok((StatusCode::NO_CONTENT, headers))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /auth/me` (Bearer)
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(user.into())
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid username or password", json!({}))
}

/// Builds the `Set-Cookie` value for the access token. `max_age = 0` clears it.
fn access_cookie(token: &str, max_age: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie).map_err(|e| {
        AppError::internal("Could not build cookie", json!({ "reason": e.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = access_cookie("abc.def.ghi", 1800, false).unwrap();
        let value = cookie.to_str().unwrap();

        assert!(value.starts_with("access_token=abc.def.ghi;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=1800"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_is_secure_when_configured() {
        let cookie = access_cookie("", 0, true).unwrap();
        let value = cookie.to_str().unwrap();

        assert!(value.starts_with("access_token=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(value.ends_with("; Secure"));
    }
}
