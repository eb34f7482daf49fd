//! Business logic services for the application layer.

pub mod auth_service;
pub mod calculation_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use calculation_service::CalculationService;
pub use token_service::TokenService;
