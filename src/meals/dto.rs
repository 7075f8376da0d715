use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::foods::{portions::PortionUnit, services::MatchConfidence};
use crate::meals::repo_types::{FoodEntry, Meal};
use crate::meals::services::{BudgetStatus, DaySummary};
use crate::profile::services::round1;

#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    pub meal_name: String,
    pub items: Vec<FoodItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct FoodItemRequest {
    pub food: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>, // defaults to gram
}

#[derive(Debug, Serialize)]
pub struct FoodEntryView {
    pub food_name: String,
    pub quantity: f64,
    pub unit: PortionUnit,
    pub grams: f64,
    pub calories: f64,
    pub confidence: MatchConfidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_to: Option<String>,
}

impl From<&FoodEntry> for FoodEntryView {
    fn from(e: &FoodEntry) -> Self {
        Self {
            food_name: e.food_name.clone(),
            quantity: e.quantity,
            unit: e.unit,
            grams: e.grams,
            calories: round1(e.calories),
            confidence: e.confidence,
            matched_to: e.matched_to.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealView {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    pub total_calories: f64,
    pub entries: Vec<FoodEntryView>,
}

impl From<&Meal> for MealView {
    fn from(m: &Meal) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            logged_at: m.logged_at,
            total_calories: round1(m.total_calories()),
            entries: m.entries.iter().map(FoodEntryView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub consumed: f64,
    pub remaining: f64,
    pub percent_remaining: f64,
    pub percent_consumed: f64,
    pub status: BudgetStatus,
}

impl From<DaySummary> for SummaryView {
    fn from(s: DaySummary) -> Self {
        Self {
            consumed: round1(s.consumed),
            remaining: round1(s.remaining),
            percent_remaining: round1(s.percent_remaining),
            percent_consumed: round1(s.percent_consumed),
            status: s.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: Date,
    pub target: f64,
    pub meals: Vec<MealView>,
    pub summary: SummaryView,
}

#[derive(Debug, Serialize)]
pub struct CreatedMealResponse {
    pub meal: MealView,
    pub day: DayResponse,
}
