//! Store implementations.
//!
//! # Backends
//!
//! - [`PgSessionProvider`] / [`PgUrlRepository`] - PostgreSQL via SQLx
//! - [`MemoryStore`] / [`MemoryUrlRepository`] - In-process table, used when
//!   no database is configured and in tests

pub mod memory_store;
pub mod pg_session;
pub mod pg_url_repository;

pub use memory_store::{MemorySession, MemoryStore, MemoryUrlRepository};
pub use pg_session::{ORIGINAL_URL_CONSTRAINT, PgSession, PgSessionProvider, SHORT_CODE_CONSTRAINT};
pub use pg_url_repository::PgUrlRepository;
