//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, CalculationService, TokenService};
use crate::domain::repositories::{CalculationRepository, UserRepository};
use crate::infrastructure::session::SessionStore;

/// Services shared across requests.
///
/// Cloned per request by axum; everything inside is behind `Arc`.
/// Repositories are trait objects so tests can swap in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub calculation_service: Arc<CalculationService<dyn CalculationRepository>>,
    pub sessions: Arc<dyn SessionStore>,
    /// Adds `Secure` to the login cookie.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        calculations: Arc<dyn CalculationRepository>,
        tokens: Arc<TokenService>,
        cookie_secure: bool,
    ) -> Self {
        let sessions = tokens.sessions().clone();

        Self {
            auth_service: Arc::new(AuthService::new(users, tokens)),
            calculation_service: Arc::new(CalculationService::new(calculations)),
            sessions,
            cookie_secure,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        self.auth_service.tokens()
    }
}
