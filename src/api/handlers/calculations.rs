//! Handlers for the calculation history (BREAD) endpoints.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::calculation::{
    CalculationCreate, CalculationListQuery, CalculationResponse, CalculationUpdate,
};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a calculation for the current user.
///
/// # Endpoint
///
/// `POST /calculations`
///
/// # Request Body
///
/// ```json
/// { "type": "addition", "inputs": [10, 20, 30] }
/// ```
///
/// # Errors
///
/// - 400 for a zero divisor or fewer than two inputs
/// - 422 for a missing field, an unknown `type` or non-numeric `inputs`
pub async fn create_calculation_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<CalculationCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<CalculationResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let calculation = state
        .calculation_service
        .create(user.id, payload.calculation_type, payload.inputs)
        .await?;

    Ok((StatusCode::CREATED, Json(calculation.into())))
}

/// Lists the current user's calculations, newest first.
///
/// # Endpoint
///
/// `GET /calculations?type=division&page=1&page_size=100`
///
/// All query parameters are optional.
pub async fn list_calculations_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    query: Result<Query<CalculationListQuery>, QueryRejection>,
) -> Result<Json<Vec<CalculationResponse>>, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::bad_request("Invalid query parameters", json!({ "reason": e.body_text() }))
    })?;
    query.validate()?;

    let calculations = state
        .calculation_service
        .list(user.id, query.into())
        .await?;

    Ok(Json(calculations.into_iter().map(Into::into).collect()))
}

/// # Endpoint
///
/// `GET /calculations/{id}`
pub async fn get_calculation_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CalculationResponse>, AppError> {
    let id = calculation_id(id)?;

    let calculation = state.calculation_service.get(user.id, id).await?;

    Ok(Json(calculation.into()))
}

/// Replaces the inputs and recomputes the result. The type is immutable.
///
/// # Endpoint
///
/// `PUT /calculations/{id}`
///
/// ```json
/// { "inputs": [4, 5, 6] }
/// ```
pub async fn update_calculation_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CalculationUpdate>, JsonRejection>,
) -> Result<Json<CalculationResponse>, AppError> {
    let id = calculation_id(id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let calculation = state
        .calculation_service
        .update(user.id, id, payload.inputs)
        .await?;

    Ok(Json(calculation.into()))
}

/// # Endpoint
///
/// `DELETE /calculations/{id}` - `204 No Content`
pub async fn delete_calculation_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = calculation_id(id)?;

    state.calculation_service.delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn calculation_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    id.map(|Path(id)| id).map_err(|e| {
        AppError::bad_request("Invalid calculation id", json!({ "reason": e.body_text() }))
    })
}
