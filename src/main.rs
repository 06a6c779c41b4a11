//! GA4 MCP server binary
//!
//! Speaks MCP on stdin/stdout; all logging goes to stderr.

use anyhow::{Context, Result};
use ga4_mcp_server::{Ga4Client, Ga4Config, McpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Ga4Config::from_env().context("Failed to load configuration")?;
    info!(property = %config.property_id, project = %config.project_id, "starting GA4 MCP server");

    let client = Ga4Client::new(&config).context("Failed to create GA4 client")?;
    let server = McpServer::new(Arc::new(client));
    server.run().await?;
    Ok(())
}
