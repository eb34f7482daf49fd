//! DTOs for calculation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::calculation_service::{
    DEFAULT_PAGE_SIZE, ListOptions, MAX_PAGE_SIZE,
};
use crate::domain::entities::Calculation;
use crate::domain::operation::CalculationType;
use crate::utils::validation::check_finite_inputs;

/// Request body for `POST /calculations`.
///
/// Unknown fields (such as a client-supplied `user_id`) are ignored; the
/// owner is always the authenticated user.
#[derive(Debug, Deserialize, Validate)]
pub struct CalculationCreate {
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,

    #[validate(custom(function = "check_finite_inputs"))]
    pub inputs: Vec<f64>,
}

/// Request body for `PUT /calculations/{id}`. The type cannot be changed.
#[derive(Debug, Deserialize, Validate)]
pub struct CalculationUpdate {
    #[validate(custom(function = "check_finite_inputs"))]
    pub inputs: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Calculation> for CalculationResponse {
    fn from(calc: Calculation) -> Self {
        Self {
            id: calc.id,
            user_id: calc.user_id,
            calculation_type: calc.calculation_type,
            inputs: calc.inputs,
            result: calc.result,
            created_at: calc.created_at,
            updated_at: calc.updated_at,
        }
    }
}

/// Query parameters for `GET /calculations`.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CalculationListQuery {
    #[serde(default, rename = "type")]
    pub calculation_type: Option<CalculationType>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 1_000_000, message = "Page must be between 1 and 1000000"))]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 1000, message = "Page size must be between 1 and 1000"))]
    pub page_size: Option<i64>,
}

impl From<CalculationListQuery> for ListOptions {
    fn from(query: CalculationListQuery) -> Self {
        Self {
            calculation_type: query.calculation_type,
            page: query.page.unwrap_or(1),
            page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
        }
    }
}
