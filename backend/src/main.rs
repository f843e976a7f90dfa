use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weight_log_backend::{config::ServerConfig, create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state, &config.cors_origin)?;

    let listener = TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
