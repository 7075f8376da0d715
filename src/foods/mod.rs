use crate::state::AppState;
use axum::Router;

pub mod catalog;
mod dto;
pub mod handlers;
pub mod portions;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::foods_routes()
}
