//! Lagoon pricing service entry point

use anyhow::Context;
use lagoon_api::AppState;
use lagoon_core::AppConfig;

/// Load configuration from the file named by `LAGOON_CONFIG`, falling back
/// to defaults when the variable is unset
fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var("LAGOON_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            let config = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path))?;
            Ok(config)
        }
        Err(_) => Ok(AppConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lagoon=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting Lagoon pricing service");

    let config = load_config()?;
    let port = config.api_port;
    let state = AppState::with_config(config);

    lagoon_api::start_server(state, port).await?;
    Ok(())
}
