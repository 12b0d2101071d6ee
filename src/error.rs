use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{mailer::MailError, query::QueryError};

/// ApiError
///
/// Every failure the HTTP boundary can report. Rendered as
/// `{ "success": false, "error": { "code", "message" } }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidParams(#[from] QueryError),
    #[error("{0}")]
    Validation(String),
    #[error("resource not found")]
    NotFound,
    #[error("authentication required")]
    Unauthorized,
    #[error("insufficient role for this resource")]
    Forbidden,
    #[error("too many submissions, try again later")]
    RateLimited,
    #[error("failed to deliver message")]
    MailDelivery(#[from] MailError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParams(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::MailDelivery(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Machine-readable code clients branch on.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidParams(_) => "INVALID_PARAMS",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::RateLimited => "RATE_LIMITED",
            ApiError::MailDelivery(_) => "MAIL_DELIVERY_FAILED",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// ErrorEnvelope
///
/// The failure shape shared by every JSON endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::MailDelivery(source) = &self {
            // The provider's detail stays in the logs, not in the response.
            tracing::error!("contact delivery failed: {}", source);
        }

        let body = ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}
