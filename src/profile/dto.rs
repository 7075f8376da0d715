use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::CoreError;
use crate::profile::repo_types::Profile;
use crate::profile::services::{round1, CalorieTargets, GoalProjection};

/// Request body for profile setup. Enum fields arrive as text and are
/// parsed so that unknown values surface as field errors.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: i64,
    pub gender: String,
    pub activity_level: String,
    pub goal_rate: String,
    #[serde(default)]
    pub goal_weight_kg: Option<f64>,
}

impl TryFrom<ProfileRequest> for Profile {
    type Error = CoreError;

    fn try_from(r: ProfileRequest) -> Result<Self, Self::Error> {
        let age_years = u32::try_from(r.age_years)
            .ok()
            .filter(|age| *age > 0)
            .ok_or_else(|| {
                CoreError::profile_field(
                    "age_years",
                    format!("must be a positive whole number, got {}", r.age_years),
                )
            })?;
        let profile = Profile {
            weight_kg: r.weight_kg,
            height_cm: r.height_cm,
            age_years,
            gender: r.gender.parse()?,
            activity_level: r.activity_level.parse()?,
            goal_rate: r.goal_rate.parse()?,
            goal_weight_kg: r.goal_weight_kg,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub targets: TargetsView,
}

/// Targets rounded to one decimal for display.
#[derive(Debug, Serialize)]
pub struct TargetsView {
    pub bmr: f64,
    pub tdee: f64,
    pub daily_target: f64,
    pub intended_daily_deficit: f64,
    pub actual_daily_deficit: f64,
    pub safety_floor_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight_tdee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionView>,
}

#[derive(Debug, Serialize)]
pub struct ProjectionView {
    pub weight_to_lose_kg: f64,
    pub days_to_goal: u32,
    pub weeks_to_goal: f64,
    pub estimated_goal_date: Date,
}

impl From<GoalProjection> for ProjectionView {
    fn from(p: GoalProjection) -> Self {
        Self {
            weight_to_lose_kg: round1(p.weight_to_lose_kg),
            days_to_goal: p.days_to_goal,
            weeks_to_goal: p.weeks_to_goal,
            estimated_goal_date: p.estimated_goal_date,
        }
    }
}

impl From<CalorieTargets> for TargetsView {
    fn from(t: CalorieTargets) -> Self {
        Self {
            bmr: round1(t.bmr),
            tdee: round1(t.tdee),
            daily_target: round1(t.daily_target),
            intended_daily_deficit: round1(t.intended_daily_deficit),
            actual_daily_deficit: round1(t.actual_daily_deficit),
            safety_floor_applied: t.safety_floor_applied,
            goal_weight_tdee: t.goal_weight_tdee.map(round1),
            projection: t.projection.map(ProjectionView::from),
        }
    }
}
