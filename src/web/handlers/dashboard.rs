//! Authenticated pages: calculation history, detail and edit views.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::application::services::calculation_service::ListOptions;
use crate::domain::entities::Calculation;
use crate::domain::operation::CalculationType;
use crate::error::AppError;
use crate::state::AppState;

/// A calculation pre-formatted for display.
pub struct CalculationView {
    pub id: String,
    pub calculation_type: &'static str,
    pub inputs: String,
    pub result: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Calculation> for CalculationView {
    fn from(calc: &Calculation) -> Self {
        Self {
            id: calc.id.to_string(),
            calculation_type: calc.calculation_type.as_str(),
            inputs: calc.inputs_display(),
            result: calc.result.to_string(),
            created_at: calc.created_at.format("%Y-%m-%d %H:%M").to_string(),
            updated_at: calc.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// History table with the new-calculation form.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub full_name: String,
    pub operations: Vec<&'static str>,
    pub calculations: Vec<CalculationView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "view_calculation.html")]
pub struct ViewCalculationTemplate {
    pub calculation: CalculationView,
}

#[derive(Template, WebTemplate)]
#[template(path = "edit_calculation.html")]
pub struct EditCalculationTemplate {
    pub calculation: CalculationView,
}

/// Renders the user's calculation history.
///
/// # Endpoint
///
/// `GET /dashboard`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let calculations = state
        .calculation_service
        .list(user.id, ListOptions::default())
        .await?;

    Ok(DashboardTemplate {
        full_name: user.full_name(),
        operations: CalculationType::ALL.iter().map(|t| t.as_str()).collect(),
        calculations: calculations.iter().map(CalculationView::from).collect(),
    })
}

/// `GET /dashboard/view/{id}`
///
/// Unknown, foreign or malformed ids redirect back to `/dashboard`.
pub async fn view_calculation_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(calculation) = load(&state, user.id, &id).await? else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    Ok(ViewCalculationTemplate { calculation }.into_response())
}

/// `GET /dashboard/edit/{id}`
pub async fn edit_calculation_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(calculation) = load(&state, user.id, &id).await? else {
        return Ok(Redirect::to("/dashboard").into_response());
    };

    Ok(EditCalculationTemplate { calculation }.into_response())
}

async fn load(
    state: &AppState,
    user_id: Uuid,
    id: &str,
) -> Result<Option<CalculationView>, AppError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };

    match state.calculation_service.get(user_id, id).await {
        Ok(calc) => Ok(Some(CalculationView::from(&calc))),
        Err(AppError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
