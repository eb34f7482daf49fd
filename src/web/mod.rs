//! Web layer for browser-based UI.
//!
//! Server-rendered Askama pages. Forms post to the JSON API from
//! JavaScript; the dashboard pages read the `access_token` cookie.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie authentication
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
