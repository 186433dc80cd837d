//! Category preview command.

use std::sync::Arc;

use console::style;

use crate::config::Settings;
use crate::repository::CatalogStore;
use crate::services::{CatalogError, CategoryPageHandler};

/// Print the metadata and page outline for a category.
pub async fn cmd_show(settings: &Settings, category: &str) -> anyhow::Result<()> {
    let ctx = settings.create_db_context()?;
    let store: Arc<dyn CatalogStore> = Arc::new(ctx.catalog());
    let pages = CategoryPageHandler::new(store)
        .with_site_name(settings.site_name.clone())
        .with_placeholder_image(settings.placeholder_image.clone());

    let (metadata, page) = tokio::join!(
        pages.generate_metadata(category),
        pages.render_page(category)
    );

    let (metadata, page) = match (metadata, page) {
        (Ok(metadata), Ok(page)) => (metadata, page),
        (Err(CatalogError::NotFound(slug)), _) | (_, Err(CatalogError::NotFound(slug))) => {
            eprintln!("{} Category not found: {}", style("✗").red(), slug);
            anyhow::bail!("category not found: {}", slug);
        }
        (Err(e), _) | (_, Err(e)) => return Err(e.into()),
    };

    println!("{}", style(&metadata.title).bold());
    println!("  {}", metadata.open_graph.description);
    println!();

    if let Some(heading) = page.count_heading() {
        println!("{}", style(heading).cyan());
    }

    for section in &page.sections {
        println!("{}", style(&section.name).bold());
        if section.tiles.is_empty() {
            println!("  {}", style("(no subcategories)").dim());
        }
        for tile in &section.tiles {
            println!("  {} {}", tile.label, style(&tile.href).dim());
        }
    }

    Ok(())
}
