use std::sync::Arc;

use anyhow::Context;

use warden_api::{
    app::{self, services},
    config::ServerConfig,
};

const ADDR_ENV: &str = "WARDEN_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    warden_observability::init();

    let config = ServerConfig::from_env().context("failed to load configuration")?;
    let services = services::build_services(config, &services::default_factories())
        .context("invalid configuration")?;
    let app = app::build_app(Arc::new(services));

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
