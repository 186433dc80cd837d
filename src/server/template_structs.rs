//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;

use crate::services::{CategoryPage, PageMetadata};

/// Category page template.
#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate<'a> {
    pub site_name: &'a str,
    pub metadata: &'a PageMetadata,
    pub page: &'a CategoryPage,
    pub count_heading: Option<String>,
    pub image_size: u32,
}

/// Not found page template.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub message: &'a str,
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub message: &'a str,
}
