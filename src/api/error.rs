use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ErrorBody;

// Every handler failure renders as a `{ "message": ... }` JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("error calling external service: {status_code} - {status_message}")]
    Provider {
        status_code: i32,
        status_message: String,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Failure(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Provider { .. } | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Failure(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
