//! API route configuration.

use crate::api::handlers::{resolve_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// URL resource routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /urls`         - Shorten the URL in the plain-text body
/// - `GET  /urls/{code}`  - Original URL for a short code
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(shorten_handler))
        .route("/urls/{code}", get(resolve_handler))
}
