//! Calculation entity: one evaluated operation in a user's history.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::operation::CalculationType;

/// A stored calculation with its computed result.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Calculation {
    /// Inputs rendered as `"10, 20, 30"` for display.
    pub fn inputs_display(&self) -> String {
        self.inputs
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Input for inserting a calculation whose result is already computed.
#[derive(Debug, Clone)]
pub struct NewCalculation {
    pub user_id: Uuid,
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
}

/// Browse filter for a user's history.
#[derive(Debug, Clone, Default)]
pub struct CalculationFilter {
    pub calculation_type: Option<CalculationType>,
    pub offset: i64,
    pub limit: i64,
}
