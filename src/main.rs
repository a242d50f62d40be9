use movie_rec::{
    api::{create_router, AppState},
    config::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_rec=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state; the sentiment model is loaded here, once
    let state = AppState::from_config(&config)?;

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %config.bind_address(),
        catalog = %config.catalog_path.display(),
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
