//! SQLFrame Server Binary
//!
//! Starts the TCP server for SQLFrame.

use std::sync::Arc;

use clap::Parser;
use sqlframe::network::Server;
use sqlframe::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// SQLFrame Server
#[derive(Parser, Debug)]
#[command(name = "sqlframe-server")]
#[command(about = "Null-framed SQL command server over a shared SQLite store")]
#[command(version)]
struct Args {
    /// Listen port; non-numeric values fall back to the default
    port: Option<String>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlframe=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let mut builder = Config::builder();
    if let Some(raw) = args.port.as_deref() {
        builder = builder.port(Config::parse_port(raw));
    }
    let config = builder.build();

    tracing::info!("SQLFrame Server v{}", sqlframe::VERSION);
    tracing::info!("Database file: {}", config.database_path.display());
    tracing::info!("Listen address: {}", config.listen_addr());

    // Open engine (creates schema)
    let engine = match Engine::open(config.clone()) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(&config, engine) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    // Ctrl+C stops the accept loop
    match server.shutdown_handle() {
        Ok(handle) => {
            let installed = ctrlc::set_handler(move || {
                tracing::info!("Received Ctrl+C, initiating shutdown...");
                handle.shutdown();
            });
            if let Err(e) = installed {
                tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            }
        }
        Err(e) => tracing::warn!("Failed to create shutdown handle: {}", e),
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
