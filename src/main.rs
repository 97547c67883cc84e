use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use brunel_engine::{
    clients::{AnthropicClient, ModelClient},
    config::{Config, load_env_file, log_filter},
    http::{AppState, start_http_server},
};
use clap::Parser;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Brunel Engine: turn frustrations into insight", long_about = None)]
struct Args {
    /// Address to listen on (overrides PORT and BRUNEL_HTTP_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory holding the static frontend
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env first so RUST_LOG from it reaches the subscriber.
    let env_file = load_env_file();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter().as_str())
        .init();
    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path);
    }

    let mut config = Config::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    if let Some(bind) = args.bind {
        config.runtime.http_bind = bind;
    }
    if let Some(dir) = args.static_dir {
        config.runtime.static_dir = dir;
    }

    // One client for the whole process; handlers share it read-only.
    let client: Arc<dyn ModelClient> = Arc::new(AnthropicClient::new(
        &config.model,
        config.runtime.api_key.clone(),
    )?);

    info!("THE BRUNEL ENGINE - turn frustrations into insight");
    info!("Running: http://{}", config.runtime.http_bind);
    info!("Model:   {} ({})", config.model.label, client.model());
    if config.has_api_key() {
        info!("API Key: configured");
    } else {
        warn!("API Key: MISSING - add ANTHROPIC_API_KEY to .env");
    }

    start_http_server(AppState::new(config, client)).await?;

    Ok(())
}
