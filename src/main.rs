//! metabase-ws server binary
//!
//! Serves floor plans tinted by quarterly sales over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Read ~/.config/metabase-ws/config.toml, take secrets from the environment
//! # (a .env file in the working directory is read first when present)
//! MWS_PG_CONN=postgres://mws@localhost/mws \
//! MWS_OVERLORD_HOST=https://overlord.example.com \
//! MWS_OVERLORD_USERNAME=reporter MWS_OVERLORD_PASSWORD=... \
//! metabase-ws --port 8000
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metabase_ws::config::{load_env_file, Config, ConfigOverrides};
use metabase_ws::web;

/// metabase-ws - floor plans tinted by quarterly sales
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "MWS_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MWS_PORT")]
    port: Option<u16>,

    /// Postgres connection string for the floor store
    #[arg(long, env = "MWS_PG_CONN", hide_env_values = true)]
    pg_conn: Option<String>,

    /// Base URL of the metrics service
    #[arg(long, env = "MWS_OVERLORD_HOST")]
    overlord_host: Option<String>,

    /// Metrics service username
    #[arg(long, env = "MWS_OVERLORD_USERNAME")]
    overlord_username: Option<String>,

    /// Metrics service password
    #[arg(long, env = "MWS_OVERLORD_PASSWORD", hide_env_values = true)]
    overlord_password: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads the MWS_* fallbacks
    let env_file = load_env_file(None)?;
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        host: args.host,
        port: args.port,
        pg_conn: args.pg_conn,
        sales_host: args.overlord_host,
        sales_username: args.overlord_username,
        sales_password: args.overlord_password,
    });
    config.validate()?;

    info!(
        "Metrics host: {}, floor store pool size: {}",
        config.sales.host, config.database.max_connections
    );

    web::run_server(config).await
}
