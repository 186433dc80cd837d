//! Helper functions shared by the page and API handlers.

use axum::http::Uri;

use super::super::AppState;
use crate::services::{CatalogError, CategoryPage, PageMetadata};

/// Path prefix of the HTML category route.
pub const PAGE_PREFIX: &str = "/products/";

/// Path prefix of the JSON category route.
pub const API_PREFIX: &str = "/api/products/";

/// The category segment exactly as it appears in the request URI, still
/// percent-encoded. Path captures arrive already decoded.
pub fn raw_segment<'a>(uri: &'a Uri, prefix: &str) -> Option<&'a str> {
    uri.path()
        .strip_prefix(prefix)
        .filter(|segment| !segment.is_empty() && !segment.contains('/'))
}

/// Run both category page entry points for one request.
///
/// The two calls are independent and race each other; the first error wins,
/// metadata first when both fail.
pub async fn load_category(
    state: &AppState,
    category: &str,
) -> Result<(PageMetadata, CategoryPage), CatalogError> {
    let (metadata, page) = tokio::join!(
        state.pages.generate_metadata(category),
        state.pages.render_page(category),
    );

    match &metadata {
        Err(CatalogError::NotFound(slug)) => tracing::warn!("Category not found: {}", slug),
        Err(CatalogError::Database(e)) => {
            tracing::error!("Failed to load category {}: {}", category, e)
        }
        Ok(_) => {}
    }
    if let Err(CatalogError::Database(e)) = &page {
        tracing::error!("Failed to render category {}: {}", category, e);
    }

    Ok((metadata?, page?))
}
