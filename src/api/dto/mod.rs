//! Data Transfer Objects for API responses.
//!
//! Shorten and resolve exchange plain text; only the health check and
//! error bodies are JSON.

pub mod health;
