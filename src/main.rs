//! RabbitMQ MCP server - main entry point.
//!
//! Parses CLI flags, loads the management endpoint configuration, builds and
//! filters the tool catalog, validates it (fatal in lite mode), then serves
//! MCP over stdio until the client disconnects.

use anyhow::Result;
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;

use rabbitmq_mcp::cli::{mode_description, Cli};
use rabbitmq_mcp::tools::{
    catalog, check_tool_names, filter_stats, filter_tools, lite_tools, validate_filtered,
};
use rabbitmq_mcp::{ManagementClient, McpToolServer, RabbitConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode();

    rabbitmq_mcp::observability::init_tracing();

    let config = RabbitConfig::from_env()?;
    tracing::info!(endpoint = %config.base_url(), "management endpoint configured");

    let client = Arc::new(ManagementClient::new(config)?);

    let catalog = catalog();
    let filtered = filter_tools(&catalog, mode);

    let stats = filter_stats(catalog.len(), filtered.len(), mode);
    tracing::info!(
        mode = stats.mode,
        original = stats.original_count,
        filtered = stats.filtered_count,
        filtered_out = stats.filtered_out,
        reduction_pct = stats.reduction_percentage,
        "tool catalog filtered"
    );

    if mode.is_lite() {
        let allow_list = lite_tools();
        let name_check = check_tool_names(&allow_list, &catalog);
        if !name_check.is_valid {
            tracing::warn!(missing = ?name_check.missing, "{}", name_check.message);
        }

        // An inconsistent curated set must never be served
        let validation = validate_filtered(&filtered, mode);
        if !validation.is_valid {
            anyhow::bail!("lite mode validation failed: {}", validation.message);
        }
        tracing::info!("{}", validation.message);
    }

    tracing::info!(
        "starting RabbitMQ MCP server in {}",
        mode_description(mode, filtered.len())
    );

    let service = McpToolServer::new(client, filtered).serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
