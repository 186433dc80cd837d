//! JSON API for category pages.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::super::AppState;
use super::helpers::{load_category, raw_segment, API_PREFIX};
use crate::services::{CatalogError, CategoryPage, PageMetadata};

/// Both page outputs plus the derived count heading.
#[derive(Debug, Serialize)]
pub struct CategoryPageResponse {
    pub metadata: PageMetadata,
    pub count_heading: Option<String>,
    pub page: CategoryPage,
}

/// Error body for API failures.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
}

/// API endpoint returning a category page as JSON.
pub async fn api_category_page(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(category) = raw_segment(&uri, API_PREFIX) else {
        return api_error(StatusCode::NOT_FOUND, "not_found", "Missing category".to_string());
    };

    match load_category(&state, category).await {
        Ok((metadata, page)) => Json(CategoryPageResponse {
            metadata,
            count_heading: page.count_heading(),
            page,
        })
        .into_response(),
        Err(e @ CatalogError::NotFound(_)) => {
            api_error(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        Err(CatalogError::Database(_)) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Failed to load category".to_string(),
        ),
    }
}

fn api_error(status: StatusCode, error: &'static str, message: String) -> Response {
    (status, Json(ApiError { error, message })).into_response()
}
