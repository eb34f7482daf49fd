//! HTML template rendering handlers.

mod dashboard;
mod pages;

pub use dashboard::{dashboard_handler, edit_calculation_handler, view_calculation_handler};
pub use pages::{index_handler, login_page_handler, register_page_handler};
