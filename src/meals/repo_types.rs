use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::foods::{portions::PortionUnit, services::MatchConfidence};

/// One resolved food item. Calories are kept unrounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub food_name: String,
    pub unit: PortionUnit,
    pub quantity: f64,
    pub grams: f64,
    pub calories: f64,
    pub confidence: MatchConfidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    pub entries: Vec<FoodEntry>,
}

impl Meal {
    pub fn total_calories(&self) -> f64 {
        self.entries.iter().map(|e| e.calories).sum()
    }
}

/// All meals logged on one calendar date, in insertion order.
/// Totals are derived on read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    pub date: Date,
    pub meals: Vec<Meal>,
}

impl DailyLog {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            meals: Vec::new(),
        }
    }

    pub fn consumed(&self) -> f64 {
        self.meals.iter().map(Meal::total_calories).sum()
    }
}
