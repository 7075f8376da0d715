use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

/// Targeted weight loss per week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalRate {
    Slow,
    Moderate,
    Fast,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl GoalRate {
    pub fn kg_per_week(self) -> f64 {
        match self {
            GoalRate::Slow => 0.25,
            GoalRate::Moderate => 0.5,
            GoalRate::Fast => 0.75,
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(CoreError::profile_field(
                "gender",
                format!("expected male or female, got `{other}`"),
            )),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" | "very active" => Ok(ActivityLevel::VeryActive),
            other => Err(CoreError::profile_field(
                "activity_level",
                format!(
                    "expected sedentary, light, moderate, active or very_active, got `{other}`"
                ),
            )),
        }
    }
}

impl FromStr for GoalRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(GoalRate::Slow),
            "moderate" => Ok(GoalRate::Moderate),
            "fast" => Ok(GoalRate::Fast),
            other => Err(CoreError::profile_field(
                "goal_rate",
                format!("expected slow, moderate or fast, got `{other}`"),
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// User biometrics. Replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal_rate: GoalRate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
}

impl Profile {
    /// Range checks for the numeric fields; enum fields are checked on parse.
    pub fn validate(&self) -> Result<(), CoreError> {
        positive("weight_kg", self.weight_kg)?;
        positive("height_cm", self.height_cm)?;
        if self.age_years == 0 {
            return Err(CoreError::profile_field("age_years", "must be greater than zero"));
        }
        if let Some(goal) = self.goal_weight_kg {
            positive("goal_weight_kg", goal)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::profile_field(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}
