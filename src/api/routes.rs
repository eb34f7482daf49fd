//! API route configuration.

use crate::api::handlers::{
    create_calculation_handler, delete_calculation_handler, get_calculation_handler,
    list_calculations_handler, login_handler, logout_handler, me_handler, refresh_handler,
    register_handler, token_handler, update_calculation_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Credential endpoints that do not require a token.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login`    - JSON login, returns a token pair and sets the cookie
/// - `POST /token`    - OAuth2 password form login
/// - `POST /refresh`  - Rotate a refresh token
pub fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/token", post(token_handler))
        .route("/refresh", post(refresh_handler))
}

/// Credential endpoints protected by Bearer authentication.
///
/// # Endpoints
///
/// - `POST /logout` - Revoke the current tokens
/// - `GET  /me`     - Current user
pub fn auth_protected_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout_handler))
        .route("/me", get(me_handler))
}

/// Calculation routes, protected by Bearer authentication.
///
/// # Endpoints
///
/// - `POST   /`     - Create
/// - `GET    /`     - Browse (`type`, `page`, `page_size`)
/// - `GET    /{id}` - Read
/// - `PUT    /{id}` - Edit inputs
/// - `DELETE /{id}` - Delete
pub fn calculation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_calculations_handler).post(create_calculation_handler),
        )
        .route(
            "/{id}",
            get(get_calculation_handler)
                .put(update_calculation_handler)
                .delete(delete_calculation_handler),
        )
}
