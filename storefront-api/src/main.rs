use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use storefront_api::prelude::*;

/// storefront-api - articles and orders over HTTP
#[derive(Debug, Parser)]
#[command(name = "storefront-api")]
#[command(version, about, long_about = None)]
struct Cli {
    /// The address for the API to listen on, host and port separated by ':'
    #[arg(short, long, env = "STOREFRONT_ADDRESS")]
    address: Option<String>,

    /// Read configuration from this file instead of the search path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("couldn't load configuration from {}", path.display()))?,
        None => Config::load().context("couldn't load configuration")?,
    }
    .with_address(cli.address);

    init_tracing(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting up API...");

    let state = AppState::connect(config.clone())
        .await
        .context("couldn't connect to database")?;

    Server::new(config)
        .serve(router(state))
        .await
        .context("server failed")?;

    tracing::info!("gracefully shut down");
    Ok(())
}
