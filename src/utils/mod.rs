//! Utility functions for code generation and URL validation.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - URL shape checks for incoming requests

pub mod code_generator;
pub mod url_validator;
