//! papr-lens application library

use std::path::Path;

use anyhow::Context;
use papr_api::AppState;
use papr_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "PAPR_LENS_CONFIG";

/// Load configuration from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        tracing::info!("No config file given, using defaults");
        return Ok(AppConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = AppConfig::from_json_str(&raw)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    tracing::info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// `papr` matches every workspace crate's target by prefix
fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env()
        .add_directive("papr=debug".parse().expect("static directive"))
        .add_directive("info".parse().expect("static directive"))
}

fn init_tracing() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Run the API server until it exits
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting papr-lens");

    let config_path = std::env::var_os(CONFIG_ENV);
    let config = load_config(config_path.as_deref().map(Path::new))?;

    let state = AppState::with_config(config);
    papr_api::start_server(state)
        .await
        .context("API server stopped")?;

    Ok(())
}
