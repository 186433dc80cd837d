//! Category page handlers.

use askama::Template;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use super::super::template_structs::{CategoryTemplate, ErrorTemplate, NotFoundTemplate};
use super::super::AppState;
use super::helpers::{load_category, raw_segment, PAGE_PREFIX};
use crate::services::category_page::TILE_IMAGE_SIZE;
use crate::services::CatalogError;

/// Server-rendered category page.
pub async fn category_page(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(category) = raw_segment(&uri, PAGE_PREFIX) else {
        return not_found_page(&state);
    };

    let (metadata, page) = match load_category(&state, category).await {
        Ok(loaded) => loaded,
        Err(CatalogError::NotFound(_)) => return not_found_page(&state),
        Err(CatalogError::Database(_)) => return error_page(&state),
    };

    let template = CategoryTemplate {
        site_name: state.pages.site_name(),
        metadata: &metadata,
        count_heading: page.count_heading(),
        page: &page,
        image_size: TILE_IMAGE_SIZE,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// Fallback for unknown routes.
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_page(&state)
}

fn not_found_page(state: &AppState) -> Response {
    let template = NotFoundTemplate {
        site_name: state.pages.site_name(),
        title: "Not Found",
        message: "The page you are looking for does not exist.",
    };
    let body = template
        .render()
        .unwrap_or_else(|_| "Not Found".to_string());
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

fn error_page(state: &AppState) -> Response {
    let template = ErrorTemplate {
        site_name: state.pages.site_name(),
        title: "Error",
        message: "Something went wrong while loading this page.",
    };
    let body = template
        .render()
        .unwrap_or_else(|_| "Internal Server Error".to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}
