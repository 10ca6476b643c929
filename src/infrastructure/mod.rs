//! Infrastructure layer for external integrations.
//!
//! This layer implements the store contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory store implementations

pub mod persistence;
