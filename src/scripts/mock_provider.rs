use anyhow::Result;
use api_wallet::{config::ProviderConfig, handlers::provider_router, models::X402Metadata};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProviderConfig::from_env()?;

    tracing::info!("Starting mock provider v{}", env!("CARGO_PKG_VERSION"));

    let metadata = X402Metadata::new(
        config.name.clone(),
        config.price_usd,
        config.provider_wallet.clone(),
    );
    let app = provider_router(metadata);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("x402 metadata: http://{}/.well-known/x402", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}
