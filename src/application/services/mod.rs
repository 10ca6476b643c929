//! Business logic services for the application layer.

pub mod shorten_service;

pub use shorten_service::{
    DEFAULT_MAX_CODE_ATTEMPTS, ShortenError, ShortenService, UrlShortener,
};
