//! PostgreSQL implementation of the calculation repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Calculation, CalculationFilter, NewCalculation};
use crate::domain::operation::CalculationType;
use crate::domain::repositories::CalculationRepository;
use crate::error::AppError;

/// Raw `calculations` row; `calculation_type` is stored as text.
#[derive(sqlx::FromRow)]
struct CalculationRow {
    id: Uuid,
    user_id: Uuid,
    calculation_type: String,
    inputs: Vec<f64>,
    result: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CalculationRow> for Calculation {
    type Error = AppError;

    fn try_from(row: CalculationRow) -> Result<Self, Self::Error> {
        let calculation_type = row.calculation_type.parse::<CalculationType>().map_err(|e| {
            AppError::internal("Corrupt calculation row", json!({ "id": row.id, "reason": e }))
        })?;

        Ok(Calculation {
            id: row.id,
            user_id: row.user_id,
            calculation_type,
            inputs: row.inputs,
            result: row.result,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository for calculation history.
pub struct PgCalculationRepository {
    pool: Arc<PgPool>,
}

impl PgCalculationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalculationRepository for PgCalculationRepository {
    async fn create(&self, new_calculation: NewCalculation) -> Result<Calculation, AppError> {
        let row = sqlx::query_as::<_, CalculationRow>(
            r#"
            INSERT INTO calculations (id, user_id, calculation_type, inputs, result)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, calculation_type, inputs, result, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_calculation.user_id)
        .bind(new_calculation.calculation_type.as_str())
        .bind(&new_calculation.inputs)
        .bind(new_calculation.result)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Calculation>, AppError> {
        let row = sqlx::query_as::<_, CalculationRow>(
            r#"
            SELECT id, user_id, calculation_type, inputs, result, created_at, updated_at
            FROM calculations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Calculation::try_from).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: CalculationFilter,
    ) -> Result<Vec<Calculation>, AppError> {
        let rows = sqlx::query_as::<_, CalculationRow>(
            r#"
            SELECT id, user_id, calculation_type, inputs, result, created_at, updated_at
            FROM calculations
            WHERE user_id = $1
              AND ($2::text IS NULL OR calculation_type = $2)
            ORDER BY created_at DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(filter.calculation_type.map(|t| t.as_str()))
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Calculation::try_from).collect()
    }

    async fn update_inputs(
        &self,
        user_id: Uuid,
        id: Uuid,
        inputs: Vec<f64>,
        result: f64,
    ) -> Result<Option<Calculation>, AppError> {
        let row = sqlx::query_as::<_, CalculationRow>(
            r#"
            UPDATE calculations
            SET inputs = $3, result = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, calculation_type, inputs, result, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&inputs)
        .bind(result)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Calculation::try_from).transpose()
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM calculations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_type(&self) -> Result<Vec<(CalculationType, i64)>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT calculation_type, COUNT(*)
            FROM calculations
            GROUP BY calculation_type
            ORDER BY calculation_type
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(name, count)| {
                name.parse::<CalculationType>()
                    .map(|t| (t, count))
                    .map_err(|e| AppError::internal("Corrupt calculation type", json!({ "reason": e })))
            })
            .collect()
    }
}
