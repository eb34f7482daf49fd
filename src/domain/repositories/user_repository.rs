//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or e-mail is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Finds a user whose username equals `login` or whose e-mail equals it
    /// case-insensitively.
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<User>, AppError>;

    /// Returns true if either the username or the e-mail is already registered.
    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, AppError>;

    /// Records a successful login.
    async fn update_last_login(&self, id: Uuid) -> Result<(), AppError>;

    /// Activates or deactivates an account.
    ///
    /// Returns `Ok(false)` if no user has this id.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<bool, AppError>;

    /// Replaces the stored password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError>;

    /// Lists users, newest first.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Counts all users.
    async fn count(&self) -> Result<i64, AppError>;

    /// Round-trips to the backing store for health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
