use anyhow::Context;

use pharmastock_api::{app, BIND_ENV, DEFAULT_BIND};
use pharmastock_infra::StoreConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pharmastock_observability::init();

    let bind = std::env::var(BIND_ENV).unwrap_or_else(|_| {
        tracing::warn!("{BIND_ENV} not set; listening on {DEFAULT_BIND}");
        DEFAULT_BIND.to_string()
    });

    let services = app::services::build_services(StoreConfig::from_env())
        .context("failed to open the inventory store")?;
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
