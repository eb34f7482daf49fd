//! Helper functions used across the application.
//!
//! - [`password`] - Argon2 hashing, verification and random password generation
//! - [`validation`] - Custom `validator` rules for request DTOs

pub mod password;
pub mod validation;
