//! Application layer services implementing business logic.
//!
//! Services consume the store contracts from [`crate::domain`] and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short code creation and resolution

pub mod services;
