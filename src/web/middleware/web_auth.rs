//! Cookie-based authentication middleware for HTML pages.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::api::handlers::auth::ACCESS_TOKEN_COOKIE;
use crate::api::middleware::CurrentUser;
use crate::state::AppState;

/// Authenticates page loads using the `access_token` cookie set by `/auth/login`.
///
/// # Cookie Format
///
/// ```text
/// Cookie: access_token=<jwt>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `access_token` cookie from request
/// 2. Resolve the user via [`crate::application::services::AuthService::current_user`]
/// 3. On success, insert [`CurrentUser`] and continue to the handler
/// 4. On failure or missing cookie, redirect (303) to `/login`
///
/// Unlike the API auth middleware which returns `401 Unauthorized`,
/// this middleware redirects to the login page for a browser context.
///
/// # Example
///
/// ```rust,ignore
/// let protected = web::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = cookie_value(&req, ACCESS_TOKEN_COOKIE) else {
        return Err(Redirect::to("/login"));
    };

    match st.auth_service.current_user(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected dashboard cookie");
            Err(Redirect::to("/login"))
        }
    }
}

/// Finds `name` in the `Cookie` header, ignoring other cookies.
fn cookie_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}
