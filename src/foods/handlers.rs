use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{instrument, warn};

use crate::{
    error::internal,
    foods::{
        dto::{EstimateQuery, EstimateResponse},
        portions::PortionUnit,
    },
    meals::services::{budget_check, resolve_entry},
    profile::handlers::load_targets,
    profile::services::round1,
    state::AppState,
};

pub fn foods_routes() -> Router<AppState> {
    Router::new().route("/foods/estimate", get(estimate_food))
}

#[instrument(skip(state))]
pub async fn estimate_food(
    State(state): State<AppState>,
    Query(q): Query<EstimateQuery>,
) -> Result<Json<EstimateResponse>, (StatusCode, String)> {
    if q.food.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Food name required".into()));
    }
    let unit = match q.unit.as_deref() {
        Some(u) => u.parse::<PortionUnit>().map_err(|e| {
            warn!(error = %e, "estimate rejected");
            (StatusCode::BAD_REQUEST, e.to_string())
        })?,
        None => PortionUnit::Gram,
    };
    let entry = resolve_entry(&state.foods, &q.food, unit, q.quantity)?;

    let budget = match load_targets(&state).await? {
        Some((_, targets)) => {
            let today = OffsetDateTime::now_utc().date();
            let consumed = state
                .store
                .load_day(today)
                .await
                .map_err(internal)?
                .map(|log| log.consumed())
                .unwrap_or(0.0);
            let mut check = budget_check(entry.calories, targets.daily_target - consumed);
            check.remaining = round1(check.remaining);
            check.exceeds_by = round1(check.exceeds_by);
            Some(check)
        }
        None => None,
    };

    Ok(Json(EstimateResponse {
        food: entry.food_name,
        quantity: entry.quantity,
        unit: entry.unit,
        grams: entry.grams,
        calories: round1(entry.calories),
        confidence: entry.confidence,
        matched_to: entry.matched_to,
        budget,
    }))
}
