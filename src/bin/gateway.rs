//! LendHub Gateway - validates payload shape and forwards to the server

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lendhub_server::{config::AppConfig, gateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("lendhub_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LendHub Gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Forwarding to {}", config.gateway.server_url);

    let client = gateway::ForwardClient::new(config.gateway.server_url.clone());
    let app = gateway::create_router(client);

    let addr = SocketAddr::new(
        config.gateway.host.parse().expect("Invalid host address"),
        config.gateway.port,
    );

    tracing::info!("Gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
