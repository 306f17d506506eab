//! Utility functions for key generation and URL handling.
//!
//! - [`key_generator`] - Random key generation with uniqueness retry
//! - [`url_validator`] - Target URL validation

pub mod key_generator;
pub mod url_validator;
