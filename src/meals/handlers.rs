use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use time::{macros::format_description, Date, OffsetDateTime};
use tracing::{info, instrument, warn};

use crate::{
    error::internal,
    foods::portions::PortionUnit,
    meals::{
        dto::{CreatedMealResponse, DayResponse, LogMealRequest, MealView},
        repo_types::{DailyLog, FoodEntry},
        services::{add_meal, new_meal, resolve_entry, summary},
    },
    profile::{handlers::require_targets, services::round1},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/days/today", get(get_today))
        .route("/days/:date", get(get_day))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/meals", post(log_meal))
}

fn day_response(log: &DailyLog, target: f64) -> DayResponse {
    DayResponse {
        date: log.date,
        target: round1(target),
        meals: log.meals.iter().map(MealView::from).collect(),
        summary: summary(log, target).into(),
    }
}

fn parse_date(raw: &str) -> Result<Date, (StatusCode, String)> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid date `{raw}`, expected YYYY-MM-DD")))
}

#[instrument(skip(state, payload))]
pub async fn log_meal(
    State(state): State<AppState>,
    Json(payload): Json<LogMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedMealResponse>), (StatusCode, String)> {
    let (_, targets) = require_targets(&state).await?;

    let mut entries: Vec<FoodEntry> = Vec::with_capacity(payload.items.len());
    for item in payload.items.iter().filter(|i| !i.food.trim().is_empty()) {
        let unit = match item.unit.as_deref() {
            Some(u) => u.parse::<PortionUnit>()?,
            None => PortionUnit::Gram,
        };
        let entry = resolve_entry(&state.foods, &item.food, unit, item.quantity).map_err(|e| {
            warn!(error = %e, food = %item.food, "food item rejected");
            (StatusCode::BAD_REQUEST, e.to_string())
        })?;
        entries.push(entry);
    }
    if entries.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No food items entered".into()));
    }

    let now = OffsetDateTime::now_utc();
    let name = if payload.meal_name.trim().is_empty() {
        "meal"
    } else {
        payload.meal_name.as_str()
    };
    let meal = new_meal(name, now, entries);
    let meal_view = MealView::from(&meal);
    let total = meal.total_calories();
    if !total.is_finite() {
        return Err((StatusCode::BAD_REQUEST, "Meal calories out of range".into()));
    }

    let log = {
        let _guard = state.ledger_lock.lock().await;
        let mut log = state
            .store
            .load_day(now.date())
            .await
            .map_err(internal)?
            .unwrap_or_else(|| DailyLog::new(now.date()));
        add_meal(&mut log, meal);
        if !log.consumed().is_finite() {
            return Err((StatusCode::BAD_REQUEST, "Day calories out of range".into()));
        }
        state.store.save_day(log.date, &log).await.map_err(internal)?;
        log
    };

    info!(
        meal_id = %meal_view.id,
        meal = %meal_view.name,
        calories = round1(total),
        meals_today = log.meals.len(),
        "meal logged"
    );

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/days/{}", log.date)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedMealResponse {
            meal: meal_view,
            day: day_response(&log, targets.daily_target),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_today(
    State(state): State<AppState>,
) -> Result<Json<DayResponse>, (StatusCode, String)> {
    load_day_response(&state, OffsetDateTime::now_utc().date()).await
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, (StatusCode, String)> {
    let date = parse_date(&date)?;
    load_day_response(&state, date).await
}

async fn load_day_response(
    state: &AppState,
    date: Date,
) -> Result<Json<DayResponse>, (StatusCode, String)> {
    let (_, targets) = require_targets(state).await?;
    let log = state
        .store
        .load_day(date)
        .await
        .map_err(internal)?
        .unwrap_or_else(|| DailyLog::new(date));
    Ok(Json(day_response(&log, targets.daily_target)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::{
        app::build_app,
        config::{AppConfig, StoreBackend},
        state::AppState,
        storage::JsonFileStore,
        test_support::{send, test_app},
    };

    async fn setup_profile(app: &axum::Router) {
        let profile = json!({
            "weight_kg": 80.0, "height_cm": 180.0, "age_years": 30,
            "gender": "male", "activity_level": "moderate", "goal_rate": "moderate"
        });
        let (status, _) = send(app, Method::PUT, "/api/v1/profile", Some(profile)).await;
        assert_eq!(status, StatusCode::OK);
    }

    fn breakfast() -> Value {
        json!({
            "meal_name": "breakfast",
            "items": [
                { "food": "eggs", "quantity": 100 },
                { "food": "bread", "quantity": 2, "unit": "slice" },
                { "food": "", "quantity": 1 }
            ]
        })
    }

    #[tokio::test]
    async fn logging_requires_profile() {
        let app = test_app();
        let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(breakfast())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn logged_meals_accumulate_for_today() {
        let app = test_app();
        setup_profile(&app).await;

        let (status, body) = send(&app, Method::POST, "/api/v1/meals", Some(breakfast())).await;
        assert_eq!(status, StatusCode::CREATED);
        // 155 + 2 * 30g bread at 265/100g
        assert_eq!(body["meal"]["total_calories"], 314.0);
        assert_eq!(body["meal"]["entries"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["day"]["summary"]["consumed"], 314.0);

        let lunch = json!({
            "meal_name": "lunch",
            "items": [{ "food": "pizza", "quantity": 150, "unit": "g" }]
        });
        let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(lunch)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, day) = send(&app, Method::GET, "/api/v1/days/today", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["target"], 2209.0);
        assert_eq!(day["meals"][0]["name"], "breakfast");
        assert_eq!(day["meals"][1]["name"], "lunch");
        assert_eq!(day["summary"]["consumed"], 713.0);
        assert_eq!(day["summary"]["remaining"], 1496.0);
        assert_eq!(day["summary"]["status"], "on_track");
    }

    #[tokio::test]
    async fn invalid_unit_rejects_whole_meal() {
        let app = test_app();
        setup_profile(&app).await;
        let meal = json!({
            "meal_name": "snack",
            "items": [
                { "food": "apple", "quantity": 1, "unit": "piece" },
                { "food": "chips", "quantity": 1, "unit": "foobar" }
            ]
        });
        let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(meal)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, day) = send(&app, Method::GET, "/api/v1/days/today", None).await;
        assert_eq!(day["meals"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn oversized_quantity_leaves_day_readable() {
        let app = test_app();
        setup_profile(&app).await;
        let huge = json!({
            "meal_name": "feast",
            "items": [{ "food": "pizza", "quantity": 1e307, "unit": "bowl" }]
        });
        let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(huge)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, day) = send(&app, Method::GET, "/api/v1/days/today", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["meals"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn meals_persist_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            data_dir: dir.path().to_path_buf(),
            store: StoreBackend::File,
        });
        let store = Arc::new(JsonFileStore::new(dir.path()).await.unwrap());
        let app = build_app(AppState::from_parts(config, store));
        setup_profile(&app).await;

        let huge = json!({
            "meal_name": "feast",
            "items": [{ "food": "pizza", "quantity": 1e307 }]
        });
        let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(huge)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let lunch = json!({
            "meal_name": "lunch",
            "items": [{ "food": "rice", "quantity": 100 }]
        });
        let (status, created) = send(&app, Method::POST, "/api/v1/meals", Some(lunch)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["day"]["summary"]["consumed"], 130.0);

        let (status, day) = send(&app, Method::GET, "/api/v1/days/today", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["meals"].as_array().map(Vec::len), Some(1));
        assert_eq!(day["meals"][0]["entries"][0]["food_name"], "rice");
        assert_eq!(day["summary"]["consumed"], 130.0);
        assert_eq!(day["summary"]["remaining"], 2079.0);

        let files: Vec<_> = std::fs::read_dir(dir.path().join("days")).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn empty_meal_is_rejected() {
        let app = test_app();
        setup_profile(&app).await;
        let meal = json!({ "meal_name": "nothing", "items": [] });
        let (status, _) = send(&app, Method::POST, "/api/v1/meals", Some(meal)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn past_day_without_meals_has_full_budget() {
        let app = test_app();
        setup_profile(&app).await;
        let (status, day) = send(&app, Method::GET, "/api/v1/days/2023-12-31", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["date"], "2023-12-31");
        assert_eq!(day["summary"]["remaining"], 2209.0);
        assert_eq!(day["summary"]["percent_remaining"], 100.0);
    }

    #[tokio::test]
    async fn malformed_date_is_bad_request() {
        let app = test_app();
        setup_profile(&app).await;
        let (status, _) = send(&app, Method::GET, "/api/v1/days/31-12-2023", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
