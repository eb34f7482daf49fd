//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence` and `mockall` mocks are generated for
//! unit tests.
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod calculation_repository;
pub mod user_repository;

pub use calculation_repository::CalculationRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
