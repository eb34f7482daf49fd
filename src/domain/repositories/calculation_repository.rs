//! Repository trait for calculation history.

use crate::domain::entities::{Calculation, CalculationFilter, NewCalculation};
use crate::domain::operation::CalculationType;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for a user's calculations.
///
/// Every read and write is scoped by `user_id`; a calculation owned by
/// another user behaves exactly like a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCalculationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Inserts a calculation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_calculation: NewCalculation) -> Result<Calculation, AppError>;

    /// Finds a calculation by id within the user's history.
    async fn find_for_user(&self, user_id: Uuid, id: Uuid)
    -> Result<Option<Calculation>, AppError>;

    /// Lists the user's calculations, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: CalculationFilter,
    ) -> Result<Vec<Calculation>, AppError>;

    /// Replaces inputs and result of a calculation.
    ///
    /// Returns `Ok(None)` if the calculation does not exist for this user.
    async fn update_inputs(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: Vec<f64>,
        result: f64,
    ) -> Result<Option<Calculation>, AppError>;

    /// Deletes a calculation. Returns `Ok(false)` if nothing was deleted.
    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Counts calculations per type across all users.
    async fn count_by_type(&self) -> Result<Vec<(CalculationType, i64)>, AppError>;
}
