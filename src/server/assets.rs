//! Static asset constants.

/// Stylesheet for catalog pages.
pub const CSS: &str = include_str!("styles.css");

/// Fallback image for subcategory tiles.
pub const PLACEHOLDER_SVG: &str = include_str!("placeholder.svg");
