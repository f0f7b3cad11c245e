//! Unified API error handling
//!
//! Only precondition failures reach this type; reasoning failures are
//! reported inside a 200 verdict instead.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::InputError;

/// Body of the fixed no-input response
pub const NO_INPUT_MESSAGE: &str = "No input provided";

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Argument absent or empty (400, fixed body)
    #[error("No input provided")]
    NoInput,

    /// Argument or body over the configured limit (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Body is not a usable JSON request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Missing => ApiError::NoInput,
            InputError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoInput | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::NoInput => {
                tracing::debug!("Rejected request without input");
                return HttpResponse::build(status)
                    .json(serde_json::json!({ "error": NO_INPUT_MESSAGE }));
            }
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::BadRequest(_) => "bad_request",
        };

        tracing::warn!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

/// Map JSON extractor failures onto API errors
///
/// A request with no JSON body at all counts as missing input.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let api_error = match err {
        JsonPayloadError::ContentType => ApiError::NoInput,
        JsonPayloadError::Deserialize(ref e) if e.is_eof() && e.line() == 1 && e.column() == 0 => {
            ApiError::NoInput
        }
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ApiError::PayloadTooLarge(err.to_string())
        }
        other => ApiError::BadRequest(other.to_string()),
    };
    api_error.into()
}
