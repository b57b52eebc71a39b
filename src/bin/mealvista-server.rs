// ABOUTME: Server binary that loads configuration, wires resources, and serves the HTTP API
// ABOUTME: Supports a --http-port override and shuts down gracefully on Ctrl+C
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Mealvista Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use mealvista_server::{config::ServerConfig, logging, resources::ServerResources, routes};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "mealvista-server")]
#[command(about = "Mealvista recipe aggregation and nutrition API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(&config));
    let app = routes::router(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
