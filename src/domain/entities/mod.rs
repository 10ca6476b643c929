//! Core domain entities.
//!
//! The service persists a single entity, [`UrlRecord`], which pairs an
//! original URL with its generated short code. Records are written once and
//! never updated or deleted.

pub mod url_record;

pub use url_record::UrlRecord;
