use anyhow::Context;

use fimenu_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fimenu_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let app = fimenu_api::app::build_app(&config).context("failed to open local store")?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        public_url = %config.public_url,
        admin_configured = config.admin.is_some(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
