use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use common::types::Message;
use models::{NewProduct, Product, ProductPatch};
use tracing::info;

use crate::{errors::ApiError, observability, routes::ServerState};

type IdPath = WithRejection<Path<i64>, ApiError>;

/// Any integer is a well-formed id; one below zero simply names no product.
fn product_id(raw: i64) -> Result<u64, ApiError> {
    u64::try_from(raw).map_err(|_| ApiError::NotFound)
}

async fn refresh_count(state: &ServerState) {
    observability::set_product_count(state.products.len().await);
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses((status = 200, description = "All products in insertion order", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Product>> {
    let items = state.products.list().await;
    info!(count = items.len(), "list products");
    Json(items)
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.get(product_id(id)?).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::NewProductDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::MessageResponse),
        (status = 422, description = "Body does not match schema", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<NewProduct>, ApiError>,
) -> (StatusCode, Json<Product>) {
    let created = state.products.create(input).await;
    observability::CREATED_TOTAL.inc();
    refresh_count(&state).await;
    (StatusCode::CREATED, Json(created))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid id or malformed body", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse),
        (status = 422, description = "Body does not match schema", body = crate::openapi::MessageResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(patch), _): WithRejection<Json<ProductPatch>, ApiError>,
) -> Result<Json<Product>, ApiError> {
    let updated = state.products.update(product_id(id)?, patch).await?;
    observability::UPDATED_TOTAL.inc();
    Ok(Json(updated))
}

/// Same merge as `PUT`; documented separately so both verbs appear in the API document.
#[utoipa::path(
    patch, path = "/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid id or malformed body", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse),
        (status = 422, description = "Body does not match schema", body = crate::openapi::MessageResponse)
    )
)]
pub async fn patch(
    state: State<ServerState>,
    id: IdPath,
    body: WithRejection<Json<ProductPatch>, ApiError>,
) -> Result<Json<Product>, ApiError> {
    update(state, id, body).await
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = crate::openapi::MessageResponse),
        (status = 400, description = "Invalid id", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): IdPath,
) -> Result<Json<Message>, ApiError> {
    state.products.delete(product_id(id)?).await?;
    observability::DELETED_TOTAL.inc();
    refresh_count(&state).await;
    Ok(Json(Message::new("Product deleted")))
}
