use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    error::internal,
    profile::{
        dto::{ProfileRequest, ProfileResponse},
        repo_types::Profile,
        services::{compute_targets, CalorieTargets},
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(put_profile))
}

/// Stored profile with freshly computed targets, if one was set up.
pub(crate) async fn load_targets(
    state: &AppState,
) -> Result<Option<(Profile, CalorieTargets)>, (StatusCode, String)> {
    let Some(profile) = state.store.load_profile().await.map_err(internal)? else {
        return Ok(None);
    };
    let today = OffsetDateTime::now_utc().date();
    let targets = compute_targets(&profile, today)?;
    Ok(Some((profile, targets)))
}

/// Like [`load_targets`] but a missing profile is a 409.
pub(crate) async fn require_targets(
    state: &AppState,
) -> Result<(Profile, CalorieTargets), (StatusCode, String)> {
    load_targets(state).await?.ok_or_else(|| {
        warn!("profile not set up");
        (StatusCode::CONFLICT, "Profile not set up".to_string())
    })
}

#[instrument(skip(state, payload))]
pub async fn put_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = Profile::try_from(payload).map_err(|e| {
        warn!(error = %e, "invalid profile");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let targets = compute_targets(&profile, OffsetDateTime::now_utc().date())?;
    state.store.save_profile(&profile).await.map_err(internal)?;

    info!(
        gender = %profile.gender,
        daily_target = targets.daily_target,
        safety_floor_applied = targets.safety_floor_applied,
        "profile saved"
    );
    Ok(Json(ProfileResponse {
        profile,
        targets: targets.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    match load_targets(&state).await? {
        Some((profile, targets)) => Ok(Json(ProfileResponse {
            profile,
            targets: targets.into(),
        })),
        None => Err((StatusCode::NOT_FOUND, "Profile not set up".into())),
    }
}
