mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut builder = kabuka_sdk::AsyncKabukaSdk::builder();
    if let Ok(path) = std::env::var("KABUKA_TICKER_TABLE") {
        info!(%path, "using ticker table");
        builder = builder.ticker_table(path);
    }

    info!("Initializing kabuka SDK...");
    let sdk = builder.build().await.expect("Failed to initialize kabuka SDK");

    let state = Arc::new(AppState { sdk });

    let app = Router::new()
        .route("/api/quote/{symbol}", get(routes::quote::get_quote))
        .route("/api/chart/{symbol}", get(routes::quote::get_chart))
        .route("/api/index/{symbol}", get(routes::index::get_index))
        .route("/api/tickers/search", get(routes::tickers::search_tickers))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
