//! REST API layer for HTTP request/response handling.
//!
//! This layer validates input, calls the shortening engine and maps its
//! results to status codes.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
