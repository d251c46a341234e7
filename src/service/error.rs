use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::ModelError;

/// Service Error
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// The request carried no usable text
    #[error("No text provided")]
    Validation,

    /// The artifacts failed to load at startup
    #[error("Models not loaded")]
    Unavailable,

    /// The request body could not be decoded
    #[error("{0}")]
    MalformedRequest(String),

    /// The request body exceeds the size limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Classification failed
    #[error(transparent)]
    Internal(#[from] ModelError),
}

impl ServiceError {
    /// The HTTP status reported for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation | ServiceError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::Unavailable | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let ServiceError::Internal(error) = &self {
            log::error!("Analysis failed: {}", error);
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
