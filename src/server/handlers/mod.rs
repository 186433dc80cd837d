//! HTTP request handlers for the web server.

mod api;
mod category;
mod helpers;
mod static_files;

// Re-export handlers for use by the router
pub use api::api_category_page;
pub use category::{category_page, not_found};
pub use static_files::{health, serve_css, serve_placeholder};
