//! search-proxy: a pass-through proxy for the Google Custom Search JSON API
//!
//! This is the main entry point for the application.

use anyhow::{bail, Result};
use search_proxy::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        Some(path) => path,
        None => return Ok(()),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting search-proxy v{}", search_proxy::VERSION);

    // Load configuration
    let settings = config::load(config_path.as_deref())?;
    if settings.provider.credentials().is_none() {
        warn!("GOOGLE_API_KEY or GOOGLE_CX is not set; searches will fail until configured");
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let app = create_router(AppState::new(settings, client));

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse command line arguments.
///
/// Returns `None` when the process should exit after printing help or version.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Option<PathBuf>>> {
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("search-proxy {}", search_proxy::VERSION);
                return Ok(None);
            }
            "-c" | "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => bail!("{} requires a file argument", arg),
            },
            other => bail!("unexpected argument '{}' (see --help)", other),
        }
    }

    Ok(Some(config_path))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
search-proxy v{}
A pass-through proxy for the Google Custom Search JSON API

USAGE:
    search-proxy [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    GOOGLE_API_KEY              Google API key (required)
    GOOGLE_CX                   Custom Search engine ID (required)
    SEARCH_PROXY_SETTINGS_PATH  Path to settings.yml
    SEARCH_PROXY_BASE_URL       Provider endpoint override
    SEARCH_PROXY_PORT           Server port
    SEARCH_PROXY_BIND_ADDRESS   Bind address
    RUST_LOG                    Log filter (default: info)
"#,
        search_proxy::VERSION
    );
}
