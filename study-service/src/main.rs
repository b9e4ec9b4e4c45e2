use service_core::middleware::metrics::init_metrics;
use service_core::observability::init_tracing;
use study_service::{config::Config, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &config.service_name,
        &config.telemetry.log_level,
        config.telemetry.otlp_endpoint.as_deref(),
    );
    init_metrics();

    config.warn_missing_credentials();

    let application = Application::build(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build application: {}", e))?;
    tracing::info!(port = application.port(), "Starting study-service");

    application.run_until_stopped().await?;

    Ok(())
}
