use axum::{
    Router,
    routing::{get, post},
};
use budget_back_end::{
    api::{
        config::ApiConfig,
        handlers::{
            budget::{get_budget, post_budget},
            health,
        },
    },
    sockets::on_connect,
    utils::app_config::AppConfig,
};
use clap::Parser;
use dotenvy::dotenv;
use socketioxide::SocketIo;
use std::env;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    let (socket_layer, io) = SocketIo::new_layer();

    io.ns("/", on_connect);

    let api_config = ApiConfig::parse();
    tracing::info!("API configuration loaded successfully");

    let mut app_config = AppConfig::from_settings(&api_config.settings)?;
    app_config.set_io(io);
    tracing::info!("Application configuration loaded successfully");

    let router = Router::new()
        // Health check - public endpoint
        .route("/health", get(health::health))
        .route("/budget", post(post_budget))
        .route("/budget/:account_id", get(get_budget))
        .layer(TraceLayer::new_for_http())
        .layer(socket_layer)
        .layer(CorsLayer::permissive())
        .with_state(app_config);

    let addr = api_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Starting budget API server on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
