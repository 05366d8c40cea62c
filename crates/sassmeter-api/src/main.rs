use sassmeter_api::{serve, ApiConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // optional first argument: path to a config file
    let path = std::env::args().nth(1);
    let config = ApiConfig::load(path.as_deref())?;
    tracing::info!(provider = %config.narrator.provider, "configuration loaded");

    serve(config).await
}
