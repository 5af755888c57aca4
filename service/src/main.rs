mod config;
mod error;
mod log_files;
mod models;
mod routes;

use axum::Router;
use clap::Parser;
use config::Config;
use logscope_parser::FormatRegistry;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logscope_service=debug,logscope_parser=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    // The registry is fixed from here on and shared read-only by all requests
    let registry = FormatRegistry::with_custom(config.log_format.as_deref())?;
    let state = routes::AppState::new(registry, &config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_routes(state, &config.static_dir))
        .layer(cors);

    let addr = config.addr();
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
