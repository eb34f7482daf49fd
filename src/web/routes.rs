//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, edit_calculation_handler, index_handler, login_page_handler,
    register_page_handler, view_calculation_handler,
};
use axum::{Router, routing::get};

/// Dashboard routes requiring the `access_token` cookie, nested under `/dashboard`.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /`           - Calculation history and new-calculation form
/// - `GET /view/{id}`  - Calculation detail
/// - `GET /edit/{id}`  - Edit inputs
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/view/{id}", get(view_calculation_handler))
        .route("/edit/{id}", get(edit_calculation_handler))
}

/// Public pages.
///
/// # Endpoints
///
/// - `GET /`         - Home page
/// - `GET /login`    - Login page
/// - `GET /register` - Registration page
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", get(login_page_handler))
        .route("/register", get(register_page_handler))
}
