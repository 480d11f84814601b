// mcp-scout - Main Entry Point
//
// Thin CLI over the discovery library:
// - discover: run the bounded connect-then-discover workflow
// - probe: plain reachability check against an endpoint
//
// Configuration is always an explicit file argument; nothing is hardcoded
// or process-wide.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mcp_scout::discovery::{
    discover_capabilities_http, load_raw_config, DiscoveryClient, HttpConnector, ServerConfig,
};
use mcp_scout::probe::probe_endpoint;
use mcp_scout::report::render_capability_report;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// mcp-scout: bounded-time MCP capability discovery
#[derive(Parser, Debug)]
#[command(name = "mcp-scout")]
#[command(version = "0.1.0")]
#[command(about = "Discover the tools advertised by a remote MCP server", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to a server and list its advertised tools
    Discover {
        /// Path to a JSON config file ({"<server>": {"url", "headers"?, "timeout"?, "sse_read_timeout"?}})
        #[arg(long)]
        config: PathBuf,

        /// Pick a named server entry instead of the first one
        #[arg(long)]
        server: Option<String>,
    },
    /// Check that an endpoint answers a plain GET within a budget
    Probe {
        /// Endpoint URL
        #[arg(long)]
        url: String,

        /// Probe budget in whole seconds
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(filter.into())
                .from_env_lossy(),
        )
        .init();

    match args.command {
        Commands::Discover { config, server } => discover(&config, server.as_deref()).await,
        Commands::Probe { url, timeout_secs } => probe(&url, timeout_secs).await,
    }
}

/// Run one discovery pass and print the capability report
async fn discover(config_path: &PathBuf, server: Option<&str>) -> Result<()> {
    let raw = load_raw_config(config_path)?;

    let tools = match server {
        Some(name) => {
            let config = ServerConfig::from_raw_named(&raw, name)?;
            DiscoveryClient::new(HttpConnector::new()).run(&config).await
        }
        None => discover_capabilities_http(&raw).await,
    };

    match tools {
        Ok(tools) => {
            print!("{}", render_capability_report(&tools));
            Ok(())
        }
        Err(err) => {
            error!("Discovery failed in {} phase: {}", err.phase(), err);
            Err(err.into())
        }
    }
}

/// Run the reachability probe
async fn probe(url: &str, timeout_secs: u64) -> Result<()> {
    info!("Testing connection to {} with {}s timeout...", url, timeout_secs);

    let status = probe_endpoint(url, timeout_secs * 1000).await?;
    info!("Connection successful! Status: {}", status);
    Ok(())
}
