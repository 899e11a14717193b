use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const MSG_INVALID_ID: &str = "Неверный ID";
pub const MSG_NOT_FOUND: &str = "Авто не найден";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Недопустимый метод";

/// Request-scoped failure; ends the request with a JSON `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", MSG_NOT_FOUND)]
    NotFound,
    #[error("{}", MSG_METHOD_NOT_ALLOWED)]
    MethodNotAllowed,
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn invalid_id() -> Self { Self::BadRequest(MSG_INVALID_ID.into()) }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Storage(msg) | ServiceError::Corrupt(msg) => ApiError::Storage(msg),
            e @ ServiceError::IdsExhausted => ApiError::Storage(e.to_string()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Decode(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        } else {
            warn!(%status, error = %msg, "request rejected");
        }
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot load car data: {0}")]
    Storage(#[from] ServiceError),
    #[error("cannot bind listener: {0}")]
    Bind(#[from] std::io::Error),
}
