//! Web server for storefront catalog pages.
//!
//! Serves server-rendered category pages (`/products/{category}`), a JSON
//! view of the same data, and the static assets those pages reference.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::{CatalogStore, DbContext};
use crate::services::CategoryPageHandler;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<CategoryPageHandler>,
}

impl AppState {
    /// Build state from settings, opening the configured database.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let ctx = settings.create_db_context()?;
        Ok(Self::from_context(&ctx, settings))
    }

    /// Build state over an existing database context.
    pub fn from_context(ctx: &DbContext, settings: &Settings) -> Self {
        let store: Arc<dyn CatalogStore> = Arc::new(ctx.catalog());
        let pages = CategoryPageHandler::new(store)
            .with_site_name(settings.site_name.clone())
            .with_placeholder_image(settings.placeholder_image.clone());
        Self::with_handler(pages)
    }

    /// Build state around a ready-made page handler.
    pub fn with_handler(pages: CategoryPageHandler) -> Self {
        Self {
            pages: Arc::new(pages),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
