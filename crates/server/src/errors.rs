use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::ServiceError;
use thiserror::Error;
use tracing::debug;

use crate::observability::NOT_FOUND_TOTAL;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Errors surfaced by the product routes, rendered as `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Product not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let msg = rejection.body_text();
        if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
            ApiError::Unprocessable(msg)
        } else {
            ApiError::BadRequest(msg)
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::NotFound => NOT_FOUND_TOTAL.inc(),
            other => debug!(error = %other, %status, "rejected request"),
        }
        (status, Json(Message::new(self.to_string()))).into_response()
    }
}
