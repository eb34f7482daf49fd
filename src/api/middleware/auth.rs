//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// The authenticated user, inserted into request extensions by [`layer`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The raw access token of the current request, needed to revoke it on logout.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Authenticates requests using JWT access tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature, expiry and token type
/// 3. Check the token id against the revocation blacklist
/// 4. Load the user and require the account to be active
/// 5. Insert [`CurrentUser`] and [`BearerToken`] into request extensions
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if any step fails.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/calculations", get(list_calculations_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Not authenticated",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.current_user(&token).await?;

    parts.extensions.insert(CurrentUser(user));
    parts.extensions.insert(BearerToken(token));

    Ok(next.run(Request::from_parts(parts, body)).await)
}
