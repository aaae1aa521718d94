//! Segment router server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ tower-http layers ──▶ routing::Router ──▶ middleware chain ──▶ route handler
//!              (request id, trace,    (first match in    (request_log,       (reads captures and
//!               timeout, body limit)   registration       access_control,     the backing store
//!                                      order, else 404)   store_switch)       from the Context)
//!
//!   config file ──▶ loader + validation ──▶ app::build ──▶ HttpServer::run
//!        └──(--watch)──▶ watcher ──▶ access rules / store mounts swapped in place
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use route_chain::config::{load_config, watcher::ConfigWatcher, RouterConfig};
use route_chain::observability::{logging, metrics};
use route_chain::{app, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "route-chain")]
#[command(about = "Segment router with ordered middleware dispatch", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload access rules and store mounts when the config file changes.
    #[arg(short, long, requires = "config")]
    watch: bool,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!("route-chain v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        access_rules = config.access.rules.len(),
        stores = config.stores.names.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (router, services) = app::build(&config)?;

    // Held for the life of the process; dropping it stops the watch.
    let _watcher = match (&cli.config, cli.watch) {
        (Some(path), true) => Some(ConfigWatcher::new(path, services.clone()).run()?),
        _ => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(router, config).run(listener, Shutdown::new()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
