use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{observability, routes::{self, ServerState}};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the app for `cfg` without binding a socket.
pub async fn build_app(cfg: &AppConfig) -> Router {
    let state = ServerState::from_config(&cfg.catalog);
    observability::set_product_count(state.products.len().await);
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    observability::register_all();

    let app: Router = build_app(&cfg).await;

    // Bind and serve
    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, seeded = cfg.catalog.seed, "starting catalog server");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
