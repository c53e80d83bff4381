//! Railstats CLI
//!
//! Terminal dashboard for the realtime national rail stats stream.
//!
//! # Configuration
//!
//! Settings come from a TOML config file (see `railstats config`) with
//! environment overrides:
//! - `RAILSTATS_WEBSOCKET_URL` / `VITE_WEBSOCKET_URL`: stats stream URL
//! - `RAILSTATS_HOST`, `RAILSTATS_SECURE`: derive the URL from a host
//! - `RAILSTATS_LOG_LEVEL`, `RAILSTATS_LOG_FORMAT`: logging
//! - `RUST_LOG`: full tracing filter

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use railstats::config::{generate_default_config, Config, ConfigError};
use railstats::dashboard::Dashboard;
use railstats::transport::WsConnector;

#[derive(Parser)]
#[command(name = "railstats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Realtime National Rail punctuality dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Websocket URL of the stats stream (overrides config)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path to a config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the live dashboard (default)
    Watch,

    /// Print the websocket URL that would be used
    Resolve,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Config { output }) => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, content)?;
                    eprintln!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
        Some(Commands::Resolve) => {
            let (_, url) = load(&cli)?;
            println!("{}", url);
        }
        Some(Commands::Watch) | None => {
            let (config, url) = load(&cli)?;
            railstats::logging::init(&config.logging);
            tracing::info!("Railstats dashboard v{}", env!("CARGO_PKG_VERSION"));
            tracing::info!("Stats endpoint: {}", url);

            let stdout = std::io::stdout();
            let clear = stdout.is_terminal();
            let mut dashboard = Dashboard::new(WsConnector, stdout).clear_screen(clear);

            dashboard.run(&url, shutdown_signal()).await?;
            tracing::info!("Railstats dashboard stopped");
        }
    }

    Ok(())
}

/// Load configuration and resolve the endpoint, `--url` taking precedence
fn load(cli: &Cli) -> Result<(Config, String), ConfigError> {
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    let url = cli.url.clone().unwrap_or_else(|| config.endpoint_url());
    Ok((config, url))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
