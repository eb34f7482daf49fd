#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, header::COOKIE};
use axum_test::TestServer;
use calculator_service::application::services::TokenService;
use calculator_service::application::services::token_service::TokenSettings;
use calculator_service::domain::entities::{
    Calculation, CalculationFilter, NewCalculation, NewUser, User,
};
use calculator_service::domain::operation::CalculationType;
use calculator_service::domain::repositories::{CalculationRepository, UserRepository};
use calculator_service::error::AppError;
use calculator_service::infrastructure::session::MemorySessionStore;
use calculator_service::routes::{RateLimit, app_router};
use calculator_service::state::AppState;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const PASSWORD: &str = "SecurePass123!";

/// In-memory user store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
            last_login: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<bool, AppError> {
        match self.users.write().await.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_active = active;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory calculation store; rows are kept in insertion order.
#[derive(Default)]
pub struct InMemoryCalculationRepository {
    rows: RwLock<Vec<Calculation>>,
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn create(&self, new_calculation: NewCalculation) -> Result<Calculation, AppError> {
        let now = Utc::now();
        let calculation = Calculation {
            id: Uuid::new_v4(),
            user_id: new_calculation.user_id,
            calculation_type: new_calculation.calculation_type,
            inputs: new_calculation.inputs,
            result: new_calculation.result,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(calculation.clone());
        Ok(calculation)
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Calculation>, AppError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: CalculationFilter,
    ) -> Result<Vec<Calculation>, AppError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .filter(|c| {
                filter
                    .calculation_type
                    .is_none_or(|t| t == c.calculation_type)
            })
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn update_inputs(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: Vec<f64>,
        result: f64,
    ) -> Result<Option<Calculation>, AppError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
        else {
            return Ok(None);
        };

        row.inputs = inputs;
        row.result = result;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(rows.len() != before)
    }

    async fn count_by_type(&self) -> Result<Vec<(CalculationType, i64)>, AppError> {
        let rows = self.rows.read().await;
        Ok(CalculationType::ALL
            .into_iter()
            .map(|t| {
                let n = rows.iter().filter(|c| c.calculation_type == t).count() as i64;
                (t, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect())
    }
}

pub fn test_token_service() -> Arc<TokenService> {
    let settings = TokenSettings {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_ttl: Duration::minutes(30),
        refresh_ttl: Duration::days(7),
    };
    Arc::new(TokenService::new(
        settings,
        Arc::new(MemorySessionStore::new()),
    ))
}

pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryCalculationRepository::default()),
        test_token_service(),
        false,
    )
}

pub fn make_server() -> TestServer {
    make_server_with_state(create_test_state())
}

pub fn make_server_with_state(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state, RateLimit::Disabled));
    TestServer::new(app).unwrap()
}

pub fn registration(username: &str) -> Value {
    json!({
        "first_name": "Test",
        "last_name": "User",
        "email": format!("{username}@example.com"),
        "username": username,
        "password": PASSWORD,
        "confirm_password": PASSWORD,
    })
}

/// Registers `username` and logs in, returning the JSON login response.
pub async fn register_and_login(server: &TestServer, username: &str) -> Value {
    server
        .post("/auth/register")
        .json(&registration(username))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": username, "password": PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Registers and logs in, returning only the access token.
pub async fn access_token(server: &TestServer, username: &str) -> String {
    register_and_login(server, username).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn cookie_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        COOKIE,
        HeaderValue::from_str(&format!("access_token={token}")).unwrap(),
    )
}
