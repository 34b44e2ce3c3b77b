use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use configs::CatalogConfig;
use service::ProductStore;

use crate::{observability, openapi::ApiDoc};

pub mod products;

/// Shared handler state: a handle to the one catalog store of this process.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductStore>,
}

impl ServerState {
    pub fn new(products: ProductStore) -> Self {
        Self { products: Arc::new(products) }
    }

    pub fn from_config(cfg: &CatalogConfig) -> Self {
        let products = if cfg.seed { ProductStore::seeded() } else { ProductStore::new() };
        Self::new(products)
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service healthy", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: product CRUD plus health, metrics and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Product routes; PUT and PATCH both merge
    let api = Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get)
                .put(products::update)
                .patch(products::patch)
                .delete(products::delete),
        );

    // Compose
    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
