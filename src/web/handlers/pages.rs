//! Public pages: home, login and registration.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Landing page with links to login and registration.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

/// Login form. Submits to `POST /auth/login` from JavaScript.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

/// Registration form. Submits to `POST /auth/register` from JavaScript.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {}

/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {}
}

/// `GET /login`
pub async fn login_page_handler() -> impl IntoResponse {
    LoginTemplate {}
}

/// `GET /register`
pub async fn register_page_handler() -> impl IntoResponse {
    RegisterTemplate {}
}
