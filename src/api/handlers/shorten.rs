//! Handler for link shortening endpoint.

use axum::extract::State;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::validate_url;

/// Shortens the URL sent as the request body.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// The original URL as plain text:
///
/// ```text
/// https://example.com/some/long/path
/// ```
///
/// # Response
///
/// The public short link as plain text:
///
/// ```text
/// http://127.0.0.1:8080/api/urls/aB3dE6gH
/// ```
///
/// Shortening the same URL again returns the same link.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not an `http`/`https` URL.
/// Returns 500 Internal Server Error if the store cannot be reached.
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<String, AppError> {
    let original_url = validate_url(&body)?;

    let code = state.shortener.shorten(original_url).await?;

    Ok(state.short_url(&code))
}
