// ABOUTME: Stdio MCP server binary for WHOOP wellness insights
// ABOUTME: Loads environment configuration, initializes logging and serves JSON-RPC on stdin/stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Wellness MCP Server Binary
//!
//! Starts the MCP server on stdio. Configuration comes from the environment
//! (and an optional dotenv file); refreshed tokens are written back to that
//! file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use wellness_mcp_server::{
    aggregator::HealthDataAggregator, config::ServerConfig, logging, mcp::McpServer,
};
use wellness_providers::{EnvFileCredentialStore, WhoopClient};

#[derive(Parser)]
#[command(name = "wellness-mcp-server")]
#[command(about = "WHOOP wellness insights for therapy sessions over the Model Context Protocol")]
#[command(version)]
pub struct Args {
    /// Dotenv file with WHOOP credentials (overrides WHOOP_ENV_FILE)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log output format: json, pretty or compact (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging_config = logging::LoggingConfig::from_env();
    if let Some(format) = args.log_format.as_deref() {
        logging_config.format = logging::LogFormat::from_str_param(format);
    }
    logging_config.init()?;

    let config = match args.env_file {
        Some(env_file) => ServerConfig::from_env_file(env_file)?,
        None => ServerConfig::from_env()?,
    };
    info!("Starting wellness MCP server");
    info!("{}", config.summary());

    let store = Arc::new(EnvFileCredentialStore::new(config.env_file.clone()));
    let client = WhoopClient::with_store(config.credential, config.client, store)?;
    let server = McpServer::new(HealthDataAggregator::new(Arc::new(client)));

    tokio::select! {
        result = server.run_stdio() => {
            if let Err(e) = result {
                error!("MCP server stopped with error: {e}");
                return Err(e.into());
            }
        }
        _ = signal::ctrl_c() => {
            info!("Interrupt received, shutting down");
        }
    }

    Ok(())
}
