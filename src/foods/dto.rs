use serde::{Deserialize, Serialize};

use crate::foods::{portions::PortionUnit, services::MatchConfidence};
use crate::meals::services::BudgetCheck;

#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    pub food: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
}
fn default_quantity() -> f64 {
    100.0
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub food: String,
    pub quantity: f64,
    pub unit: PortionUnit,
    pub grams: f64,
    pub calories: f64,
    pub confidence: MatchConfidence,
    pub matched_to: Option<String>,
    /// Present once a profile exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetCheck>,
}
