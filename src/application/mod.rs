//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, the arithmetic in
//! [`crate::domain::operation`] and token handling, and give HTTP handlers
//! a small API to call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, refresh and logout
//! - [`services::token_service::TokenService`] - JWT issuing, verification and revocation
//! - [`services::calculation_service::CalculationService`] - Calculation history (BREAD)

pub mod services;
