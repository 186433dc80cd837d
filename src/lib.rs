//! Storefront - server-rendered product catalog pages.
//!
//! Category pages list a category's subcollections and subcategories with
//! a product count, and carry title and Open Graph metadata derived from the
//! same catalog data.

pub mod cli;
pub mod config;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
