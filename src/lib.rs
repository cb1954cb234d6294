pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

/// Runs `cli` against a config read by [`Config::load_file`].
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = finish_config(config)?;
            let prometheus_handle = install_metrics_recorder(&config)?;
            cli::cmd_serve(config, prometheus_handle).await
        }
        Commands::Seed => cli::cmd_seed(&finish_config(config)?).await,
        Commands::Init => cli::cmd_init(),
    }
}

/// Environment overrides are applied once tracing is up so their warnings
/// are not lost.
fn finish_config(mut config: Config) -> anyhow::Result<Config> {
    match &config.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn install_metrics_recorder(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}
