//! Service layer for storefront page logic.
//!
//! Services hold the page logic apart from HTTP concerns so the web server
//! and the CLI share them.

pub mod category_page;

pub use category_page::{
    CatalogError, CategoryPage, CategoryPageHandler, OpenGraph, PageMetadata, Section, Tile,
};
