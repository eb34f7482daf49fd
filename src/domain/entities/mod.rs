//! Core domain entities.
//!
//! Entities are plain data; creation inputs live in separate `New*` structs.

pub mod calculation;
pub mod user;

pub use calculation::{Calculation, CalculationFilter, NewCalculation};
pub use user::{NewUser, User};
