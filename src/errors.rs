use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Upstream error payload (null when the upstream sent none).
    /// Omitted for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("City \"{city}\" not found. Please check the spelling or try another location.")]
    CityNotFound {
        city: String,
        details: Option<serde_json::Value>,
    },

    #[error("API error: {message}")]
    UpstreamStatus {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Request timed out. Please try again.")]
    UpstreamTimeout,

    #[error("Network error. Please check your internet connection.")]
    Network,

    #[error("Failed to fetch weather data")]
    FetchFailed,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// HTTP status reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::CityNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::UpstreamStatus { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::UpstreamTimeout
            | AppError::Network
            | AppError::FetchFailed
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::BadRequest(_) => None,
            AppError::CityNotFound { details, .. } | AppError::UpstreamStatus { details, .. } => {
                Some(details.clone().unwrap_or(serde_json::Value::Null))
            }
            _ => Some(serde_json::Value::Null),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::warn!("Request rejected with {}: {}", status, self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            details: self.details(),
        };
        (status, axum::Json(body)).into_response()
    }
}
