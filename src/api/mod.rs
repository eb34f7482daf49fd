//! REST API layer for HTTP request/response handling.
//!
//! Translates JSON requests into service calls and formats responses.
//! Request bodies are deserialized with `Result<Json<T>, JsonRejection>` so
//! rejections render through [`crate::error::AppError`].
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting and tracing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
