use anyhow::Context;

use mpsystem_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    mpsystem_observability::init(config.log_format);
    if config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let app = mpsystem_api::app::build_app(&config).context("failed to build application")?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        environment = %config.environment,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
