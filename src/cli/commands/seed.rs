//! Catalog import command.

use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::repository::CatalogSeed;

/// Import a catalog file into the database.
pub async fn cmd_seed(settings: &Settings, file: &Path) -> anyhow::Result<()> {
    let seed = CatalogSeed::load_from_path(file).await?;

    let ctx = settings.create_db_context()?;
    if ctx.pool().is_sqlite() {
        settings.ensure_directories()?;
    }
    ctx.init_schema().await?;

    println!(
        "{} Importing {} categories from {}",
        style("→").cyan(),
        seed.categories.len(),
        file.display()
    );

    let summary = match seed.apply(&ctx.catalog()).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("  {} Import failed: {}", style("✗").red(), e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Seeded {} categories, {} subcollections, {} subcategories, {} products",
        summary.categories,
        summary.subcollections,
        summary.subcategories,
        summary.products
    );

    println!("  {} {} categories", style("✓").green(), summary.categories);
    println!(
        "  {} {} subcollections",
        style("✓").green(),
        summary.subcollections
    );
    println!(
        "  {} {} subcategories",
        style("✓").green(),
        summary.subcategories
    );
    println!("  {} {} products", style("✓").green(), summary.products);

    Ok(())
}
