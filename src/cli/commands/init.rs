//! Initialize command.

use console::style;

use crate::config::Settings;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context()?;
    if ctx.pool().is_sqlite() {
        settings.ensure_directories()?;
    }
    ctx.init_schema().await?;
    let categories = ctx.catalog().category_count().await?;

    println!(
        "{} Initialized storefront database at {}",
        style("✓").green(),
        settings.redacted_database_url()
    );
    if categories > 0 {
        println!("  {} categories already present", categories);
    }

    Ok(())
}
