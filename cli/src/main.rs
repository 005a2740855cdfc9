//! Vehicle reservation service — CLI server
//!
//! ```sh
//! # Run with default config (~/.config/reservation-service/config.toml)
//! reservation-service
//!
//! # Custom config path
//! reservation-service --config /etc/reservation-service/config.toml
//!
//! # Override the listener
//! reservation-service --host 127.0.0.1 --port 8084
//!
//! # Validate config without starting
//! reservation-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use reservation_service::config::AppConfig;
use reservation_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Vehicle reservation service: create, cancel and list reservations over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "reservation-service",
    version,
    about = "In-memory vehicle reservation service",
    long_about = "REST API server tracking vehicle reservations per client and vehicle.\n\n\
                  Default config: ~/.config/reservation-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "RESERVATION_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(reservation_service::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref host) = cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.check {
        return match load_error {
            None => {
                println!("✅ Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   API address : {}", config.server.address());
                println!("   Log level   : {}", config.logging.level);
                println!("   Metrics     : {}", config.metrics.enabled);
                Ok(())
            }
            Some(e) => {
                eprintln!("❌ {}: {}", config_path.display(), e);
                Err(e.into())
            }
        };
    }

    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if cli.host.is_some() || cli.port.is_some() {
        info!("CLI override: address = {}", config.server.address());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;

    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
