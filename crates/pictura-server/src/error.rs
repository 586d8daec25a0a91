use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pictura_session::SubmitRejection;
use serde::Serialize;
use thiserror::Error;

/// API errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Submission refused by the session
    #[error(transparent)]
    Rejected(#[from] SubmitRejection),

    /// Request body missing, not JSON or of the wrong shape
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    /// Download requested before an image exists
    #[error("No generated image is available")]
    NoImage,

    /// Internal error; details are logged, not returned
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(rejection) => rejection.status(),
            Self::Rejected(SubmitRejection::BlankPrompt | SubmitRejection::BlankCredential) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Rejected(SubmitRejection::InFlight) => StatusCode::CONFLICT,
            Self::NoImage => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for the response
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Rejected(SubmitRejection::BlankPrompt | SubmitRejection::BlankCredential) | Self::InvalidBody(_) => {
                "invalid_request_error"
            }
            Self::Rejected(SubmitRejection::InFlight) => "conflict_error",
            Self::NoImage => "not_found_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: &'static str,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = ErrorResponse {
            error: ErrorDetails {
                message: self.to_string(),
                r#type: self.error_type(),
                code: status.as_u16(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
