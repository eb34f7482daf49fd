//! PostgreSQL repository implementations.
//!
//! Queries are built with SQLx prepared statements and decoded through
//! `FromRow` structs.
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgCalculationRepository`] - Calculation history

pub mod pg_calculation_repository;
pub mod pg_user_repository;

pub use pg_calculation_repository::PgCalculationRepository;
pub use pg_user_repository::PgUserRepository;
