//! Handler for short code lookup.

use axum::extract::{Path, State};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Returns the original URL behind a short code.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
///
/// # Response
///
/// The original URL as plain text.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never issued.
/// Returns 500 Internal Server Error if the store cannot be reached.
pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<String, AppError> {
    match state.shortener.resolve(&code).await? {
        Some(original_url) => Ok(original_url),
        None => {
            debug!(short_code = %code, "Unknown short code");
            Err(AppError::not_found(
                "Data not found in the database",
                json!({ "code": code }),
            ))
        }
    }
}
