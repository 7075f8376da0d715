use time::{Date, Duration};

use super::repo_types::{ActivityLevel, Gender, GoalRate, Profile};
use crate::error::CoreError;

/// Approximate energy content of one kilogram of body fat.
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// Lowest daily target the engine will ever recommend.
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Everything derived from a profile at setup time.
#[derive(Debug, Clone, PartialEq)]
pub struct CalorieTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub daily_target: f64,
    pub intended_daily_deficit: f64,
    pub actual_daily_deficit: f64,
    pub safety_floor_applied: bool,
    pub goal_weight_tdee: Option<f64>,
    pub projection: Option<GoalProjection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProjection {
    pub weight_to_lose_kg: f64,
    pub days_to_goal: u32,
    pub weeks_to_goal: f64,
    pub estimated_goal_date: Date,
}

/// Mifflin–St Jeor basal metabolic rate.
pub fn bmr(profile: &Profile) -> Result<f64, CoreError> {
    profile.validate()?;
    Ok(mifflin_st_jeor(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender,
    ))
}

fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

pub fn daily_deficit(goal_rate: GoalRate) -> f64 {
    KCAL_PER_KG_FAT * goal_rate.kg_per_week() / 7.0
}

/// TDEE minus the goal deficit, never below [`MIN_DAILY_CALORIES`].
pub fn daily_target(tdee: f64, goal_rate: GoalRate) -> f64 {
    (tdee - daily_deficit(goal_rate)).max(MIN_DAILY_CALORIES)
}

/// Full target breakdown; `today` anchors the goal date projection.
pub fn compute_targets(profile: &Profile, today: Date) -> Result<CalorieTargets, CoreError> {
    let bmr_kcal = bmr(profile)?;
    let tdee_kcal = tdee(bmr_kcal, profile.activity_level);
    let intended = daily_deficit(profile.goal_rate);
    let target = daily_target(tdee_kcal, profile.goal_rate);
    let actual = tdee_kcal - target;

    let goal_weight_tdee = profile.goal_weight_kg.map(|goal| {
        let goal_bmr = mifflin_st_jeor(goal, profile.height_cm, profile.age_years, profile.gender);
        tdee(goal_bmr, profile.activity_level)
    });

    let projection = profile
        .goal_weight_kg
        .and_then(|goal| project_goal(profile.weight_kg - goal, actual, today));

    Ok(CalorieTargets {
        bmr: bmr_kcal,
        tdee: tdee_kcal,
        daily_target: target,
        intended_daily_deficit: intended,
        actual_daily_deficit: actual,
        safety_floor_applied: tdee_kcal - intended < MIN_DAILY_CALORIES,
        goal_weight_tdee,
        projection,
    })
}

fn project_goal(weight_to_lose_kg: f64, deficit: f64, today: Date) -> Option<GoalProjection> {
    if weight_to_lose_kg <= 0.0 || deficit <= 0.0 {
        return None;
    }
    let days = (weight_to_lose_kg * KCAL_PER_KG_FAT / deficit).ceil();
    let days_to_goal = u32::try_from(days as i64).ok()?;
    let estimated_goal_date = today.checked_add(Duration::days(i64::from(days_to_goal)))?;
    Some(GoalProjection {
        weight_to_lose_kg,
        days_to_goal,
        weeks_to_goal: round1(f64::from(days_to_goal) / 7.0),
        estimated_goal_date,
    })
}

/// One-decimal rounding used for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
