//! End-to-end tests: seed a catalog file, serve it, and read the pages back.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use storefront::config::Settings;
use storefront::repository::{CatalogSeed, DbContext};
use storefront::server::{create_router, AppState};

const CATALOG: &str = r#"
[[categories]]
slug = "electronics"
name = "Electronics"

[[categories.subcollections]]
name = "Phones"

[[categories.subcollections.subcategories]]
slug = "smartphones"
name = "Smartphones"
image_url = "https://cdn.example.com/smartphones.png"
products = [
    { slug = "pixel-9", name = "Pixel 9" },
    { slug = "iphone-16", name = "iPhone 16" },
]

[[categories.subcollections.subcategories]]
slug = "feature-phones"
name = "Feature Phones"

[[categories.subcollections]]
name = "Laptops"

[[categories.subcollections]]
name = "Audio"

[[categories]]
slug = "garden"
name = "Garden"

[[categories.subcollections]]
name = "Tools"
"#;

async fn seeded_app() -> (axum::Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let seed_path: PathBuf = dir.path().join("catalog.toml");
    std::fs::write(&seed_path, CATALOG).unwrap();

    let settings = Settings::with_data_dir(dir.path().to_path_buf());
    let ctx: DbContext = settings.create_db_context().unwrap();
    ctx.init_schema().await.unwrap();

    let seed = CatalogSeed::load_from_path(&seed_path).await.unwrap();
    let summary = seed.apply(&ctx.catalog()).await.unwrap();
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.products, 2);

    let app = create_router(AppState::from_context(&ctx, &settings));
    (app, dir)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn seeded_category_renders_as_html() {
    let (app, _dir) = seeded_app().await;

    let (status, html) = get(app, "/products/electronics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Electronics | NextMaster"));
    assert!(html.contains("2 Products"));
    assert!(html.contains("including Phones, Laptops, and more. In stock and ready to ship."));
    assert!(html.contains("A small picture of Smartphones"));
    assert!(html.contains("A small picture of Feature Phones"));
}

#[tokio::test]
async fn seeded_category_json_keeps_query_order() {
    let (app, _dir) = seeded_app().await;

    let (status, body) = get(app, "/api/products/electronics").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    let sections = json["page"]["sections"].as_array().unwrap();
    let names: Vec<&str> = sections
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Phones", "Laptops", "Audio"]);

    let phones = sections[0]["tiles"].as_array().unwrap();
    assert_eq!(phones.len(), 2);
    assert_eq!(phones[0]["label"], "Smartphones");
    assert_eq!(phones[0]["href"], "/products/electronics/smartphones");
    assert_eq!(
        phones[0]["image_url"],
        "https://cdn.example.com/smartphones.png"
    );
    assert_eq!(phones[1]["label"], "Feature Phones");
    assert_eq!(phones[1]["image_url"], "/placeholder.svg");

    assert_eq!(
        json["metadata"]["openGraph"]["title"],
        "Electronics | NextMaster"
    );
}

#[tokio::test]
async fn single_subcollection_category_has_no_heading_or_trailing_comma() {
    let (app, _dir) = seeded_app().await;

    let (status, body) = get(app, "/api/products/garden").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["count_heading"].is_null());
    assert_eq!(json["page"]["product_count"], 0);
    assert_eq!(
        json["metadata"]["openGraph"]["description"],
        "Choose from our selection of Garden, including Tools and more. In stock and ready to ship."
    );
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let (app, _dir) = seeded_app().await;

    let (status, html) = get(app.clone(), "/products/furniture").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Not Found"));

    let (status, _) = get(app, "/api/products/furniture").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
