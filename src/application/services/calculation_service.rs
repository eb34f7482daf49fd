//! Calculation history: compute, store, browse, edit and delete.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Calculation, CalculationFilter, NewCalculation};
use crate::domain::operation::{CalculationType, OperationError};
use crate::domain::repositories::CalculationRepository;
use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 1000;
pub const MAX_PAGE: i64 = 1_000_000;

/// Browse parameters for [`CalculationService::list`].
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub calculation_type: Option<CalculationType>,
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            calculation_type: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListOptions {
    fn to_filter(self) -> CalculationFilter {
        let page = self.page.clamp(1, MAX_PAGE);
        let limit = self.page_size.clamp(1, MAX_PAGE_SIZE);

        CalculationFilter {
            calculation_type: self.calculation_type,
            offset: (page - 1).saturating_mul(limit),
            limit,
        }
    }
}

/// Service for a user's calculations.
///
/// Results are always computed here from the stored type and the submitted
/// inputs; clients never supply a result.
pub struct CalculationService<R: CalculationRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CalculationRepository + ?Sized> CalculationService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Computes and stores a new calculation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the operation cannot be evaluated
    /// (zero divisor, fewer than two inputs, non-finite values).
    pub async fn create(
        &self,
        user_id: Uuid,
        calculation_type: CalculationType,
        inputs: Vec<f64>,
    ) -> Result<Calculation, AppError> {
        let result = evaluate(calculation_type, &inputs)?;

        let calculation = self
            .repository
            .create(NewCalculation {
                user_id,
                calculation_type,
                inputs,
                result,
            })
            .await?;

        metrics::counter!("calculations_created_total", "type" => calculation_type.as_str())
            .increment(1);
        tracing::info!(
            calculation_id = %calculation.id,
            %user_id,
            calculation_type = %calculation_type,
            result,
            "Calculation created"
        );

        Ok(calculation)
    }

    /// Lists the user's calculations, newest first.
    pub async fn list(
        &self,
        user_id: Uuid,
        options: ListOptions,
    ) -> Result<Vec<Calculation>, AppError> {
        self.repository
            .list_for_user(user_id, options.to_filter())
            .await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the calculation does not exist or
    /// belongs to another user.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Calculation, AppError> {
        self.repository
            .find_for_user(user_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Replaces the inputs and recomputes the result with the stored type.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: Vec<f64>,
    ) -> Result<Calculation, AppError> {
        let existing = self.get(user_id, id).await?;
        let result = evaluate(existing.calculation_type, &inputs)?;

        let updated = self
            .repository
            .update_inputs(user_id, id, inputs, result)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(calculation_id = %id, %user_id, result, "Calculation updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete_for_user(user_id, id).await? {
            return Err(not_found(id));
        }

        tracing::info!(calculation_id = %id, %user_id, "Calculation deleted");
        Ok(())
    }

    /// Calculation counts per operation across all users.
    pub async fn count_by_type(&self) -> Result<Vec<(CalculationType, i64)>, AppError> {
        self.repository.count_by_type().await
    }
}

fn evaluate(calculation_type: CalculationType, inputs: &[f64]) -> Result<f64, AppError> {
    calculation_type
        .compute(inputs)
        .map_err(|e: OperationError| AppError::bad_request(e.to_string(), json!({})))
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found("Calculation not found", json!({ "id": id }))
}
