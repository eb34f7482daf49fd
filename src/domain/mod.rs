//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Users and calculations
//! - [`operation`] - The arithmetic behind each [`operation::CalculationType`]
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits are implemented in [`crate::infrastructure`].

pub mod entities;
pub mod operation;
pub mod repositories;
