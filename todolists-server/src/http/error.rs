//! API error types with IntoResponse
//!
//! Errors are converted to `{"msg": ...}` JSON responses with the matching
//! status code. Store and encoding failures are logged and answered with a
//! generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

pub const INVALID_ID_MESSAGE: &str = "Invalid id, it should be 24-character string";
pub const NO_SUCH_LIST_MESSAGE: &str = "No such list found";
pub const NO_SUCH_ITEM_MESSAGE: &str = "No item found";
pub const NOT_JSON_MESSAGE: &str = "Request content type must be application/json";
pub const NO_SUCH_ROUTE_MESSAGE: &str = "The requested URL was not found on the server";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "The method is not allowed for the requested URL";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body field missing or ill-typed (400)
    Validation(ValidationError),

    /// Path id not a 24-character ObjectId string (400)
    InvalidIdentifier,

    /// Request did not declare a JSON content type (400)
    NotJson,

    /// No matching list, item, or route (404)
    NotFound { message: &'static str },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Store failure (500, logged)
    Store(StoreError),

    /// Response could not be encoded (500, logged)
    Encode(bson::ser::Error),
}

impl ApiError {
    pub const fn list_not_found() -> Self {
        Self::NotFound {
            message: NO_SUCH_LIST_MESSAGE,
        }
    }

    pub const fn item_not_found() -> Self {
        Self::NotFound {
            message: NO_SUCH_ITEM_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::InvalidIdentifier => (StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE.to_string()),
            Self::NotJson => (StatusCode::BAD_REQUEST, NOT_JSON_MESSAGE.to_string()),
            Self::NotFound { message } => (StatusCode::NOT_FOUND, (*message).to_string()),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            Self::Encode(e) => {
                tracing::error!("Encoding error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "msg": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
