//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`session`] - Unit-of-work contract and store fault types
//!
//! Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod session;
