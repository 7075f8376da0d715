use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Errors raised by the calorie engine on invalid structured input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid profile field `{field}`: {reason}")]
    InvalidProfileField { field: &'static str, reason: String },

    #[error("invalid unit: {0}")]
    InvalidUnit(String),

    #[error("invalid quantity: {0} (must be greater than zero)")]
    InvalidQuantity(f64),
}

impl CoreError {
    pub fn profile_field(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidProfileField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for (StatusCode, String) {
    fn from(e: CoreError) -> Self {
        (StatusCode::BAD_REQUEST, e.to_string())
    }
}

/// Map a storage failure to a 500, logging the full chain.
pub fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = ?e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}
