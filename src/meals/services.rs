use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{DailyLog, FoodEntry, Meal};
use crate::{
    error::CoreError,
    foods::{
        portions::{grams_for, PortionUnit},
        services::{FoodMatcher, MatchConfidence},
    },
};

/// Share of the target below which the day counts as close to target.
const CLOSE_TO_TARGET_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    CloseToTarget,
    OverTarget,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary {
    pub consumed: f64,
    /// Negative when over budget.
    pub remaining: f64,
    /// Clamped at zero.
    pub percent_remaining: f64,
    /// Clamped at 100.
    pub percent_consumed: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BudgetCheck {
    pub remaining: f64,
    pub fits: bool,
    /// Calories above the remaining budget; zero when it fits.
    pub exceeds_by: f64,
}

/// Calories for a portion of a named food, with the match confidence.
pub fn calories_for_entry(
    matcher: &FoodMatcher,
    food_name: &str,
    unit: PortionUnit,
    quantity: f64,
) -> Result<(f64, MatchConfidence), CoreError> {
    let entry = resolve_entry(matcher, food_name, unit, quantity)?;
    Ok((entry.calories, entry.confidence))
}

/// Build the stored form of a food item.
pub fn resolve_entry(
    matcher: &FoodMatcher,
    food_name: &str,
    unit: PortionUnit,
    quantity: f64,
) -> Result<FoodEntry, CoreError> {
    let grams = grams_for(unit, quantity)?;
    let found = matcher.match_food(food_name);
    let calories = found.calories_per_100g * grams / 100.0;
    if !calories.is_finite() {
        return Err(CoreError::InvalidQuantity(quantity));
    }
    Ok(FoodEntry {
        food_name: food_name.trim().to_string(),
        unit,
        quantity,
        grams,
        calories,
        confidence: found.confidence,
        matched_to: found.matched_to.map(str::to_string),
    })
}

/// Assemble a meal from already resolved entries.
pub fn new_meal(name: &str, logged_at: OffsetDateTime, entries: Vec<FoodEntry>) -> Meal {
    Meal {
        id: Uuid::new_v4(),
        name: name.trim().to_string(),
        logged_at,
        entries,
    }
}

pub fn add_meal(log: &mut DailyLog, meal: Meal) {
    log.meals.push(meal);
}

pub fn summary(log: &DailyLog, target: f64) -> DaySummary {
    let consumed = log.consumed();
    let remaining = target - consumed;
    let (percent_remaining, percent_consumed) = if target > 0.0 {
        (
            (remaining / target * 100.0).max(0.0),
            (consumed / target * 100.0).min(100.0),
        )
    } else {
        (0.0, 0.0)
    };
    let status = if remaining < 0.0 {
        BudgetStatus::OverTarget
    } else if remaining < target * CLOSE_TO_TARGET_RATIO {
        BudgetStatus::CloseToTarget
    } else {
        BudgetStatus::OnTrack
    };
    DaySummary {
        consumed,
        remaining,
        percent_remaining,
        percent_consumed,
        status,
    }
}

/// Whether `calories` still fits into what is left of the day.
pub fn budget_check(calories: f64, remaining: f64) -> BudgetCheck {
    let fits = calories <= remaining;
    BudgetCheck {
        remaining,
        fits,
        exceeds_by: if fits { 0.0 } else { calories - remaining },
    }
}
