use crate::config::HealthConfig;
use crate::utils::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

pub const HEALTH_RESPONSE: &str = "Bot is running!";

pub fn router() -> Router {
    Router::new().route("/", get(health_check))
}

async fn health_check() -> &'static str {
    HEALTH_RESPONSE
}

pub async fn serve(config: &HealthConfig) -> Result<()> {
    let listener = TcpListener::bind((config.bind_address.as_str(), config.port)).await?;
    serve_listener(listener).await
}

pub async fn serve_listener(listener: TcpListener) -> Result<()> {
    info!("Liveness endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}
