//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod calculations;
pub mod health;

pub use auth::{
    login_handler, logout_handler, me_handler, refresh_handler, register_handler, token_handler,
};
pub use calculations::{
    create_calculation_handler, delete_calculation_handler, get_calculation_handler,
    list_calculations_handler, update_calculation_handler,
};
pub use health::{health_handler, readiness_handler};
