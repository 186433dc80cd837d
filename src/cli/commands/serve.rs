//! Web server command.

use console::style;

use crate::config::{Settings, DEFAULT_HOST, DEFAULT_PORT};

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);

    println!("{} Preparing database schema...", style("→").cyan());
    let ctx = settings.create_db_context()?;
    if ctx.pool().is_sqlite() {
        settings.ensure_directories()?;
    }
    tracing::info!(
        "Using {} database at {}",
        ctx.pool().backend_name(),
        settings.redacted_database_url()
    );
    match ctx.init_schema().await {
        Ok(()) => {
            println!("  {} Database ready", style("✓").green());
        }
        Err(e) => {
            eprintln!("  {} Schema setup failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database schema setup failed: {}", e));
        }
    }

    println!(
        "{} Starting {} at http://{}:{}",
        style("→").cyan(),
        settings.site_name,
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3000" -> 127.0.0.1:3000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3000
/// - Host and port: "0.0.0.0:8080" -> 0.0.0.0:8080
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return (DEFAULT_HOST.to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}
