use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petfinder_core::error::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Domain(err) => {
                let code = err.code();
                match err {
                    DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, code, msg),
                    DomainError::NotFound(id) => {
                        (StatusCode::NOT_FOUND, code, format!("Pet {} not found", id))
                    }
                    DomainError::Persistence(msg) => {
                        tracing::error!("Persistence error: {}", msg);
                        (StatusCode::INTERNAL_SERVER_ERROR, code, "Failed to access pet records".into())
                    }
                    DomainError::Storage(msg) => {
                        tracing::error!("Storage error: {}", msg);
                        (StatusCode::BAD_GATEWAY, code, "Failed to publish QR code".into())
                    }
                    DomainError::Encoding(msg) => {
                        tracing::error!("Encoding error: {}", msg);
                        (StatusCode::INTERNAL_SERVER_ERROR, code, "Failed to encode QR code".into())
                    }
                }
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}
