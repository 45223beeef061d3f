use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::{error, warn};

use super::ErrorBody;
use crate::constants::messages;
use crate::services::{RelayError, SearchLogError};

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    ConfigurationError(String),

    UpstreamError {
        status: StatusCode,
        message: String,
        details: serde_json::Value,
    },

    ServiceUnavailable(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            Self::UpstreamError { status, message, .. } => write!(f, "{message} ({status})"),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            Self::ConfigurationError(msg) => {
                error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg))
            }
            Self::UpstreamError {
                status,
                message,
                details,
            } => (status, ErrorBody::new(message).with_details(details)),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, ErrorBody::new(msg)),
            Self::DatabaseError(msg) | Self::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::MissingSearchString => {
                Self::ValidationError(messages::SEARCH_STRING_REQUIRED.to_string())
            }
            RelayError::MissingApiKey => {
                Self::ConfigurationError(messages::API_KEY_MISSING.to_string())
            }
            RelayError::Upstream { status, details } => {
                warn!(status, details = %details, "Error from Pixabay API");
                Self::UpstreamError {
                    status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message: messages::PROVIDER_ERROR.to_string(),
                    details,
                }
            }
            RelayError::Unavailable(msg) => {
                warn!("No response from Pixabay API: {}", msg);
                Self::ServiceUnavailable(messages::PROVIDER_UNAVAILABLE.to_string())
            }
            RelayError::Internal(msg) => {
                error!("Error fetching from Pixabay API: {}", msg);
                Self::InternalError(messages::PROVIDER_FAILED.to_string())
            }
        }
    }
}

impl From<SearchLogError> for ApiError {
    fn from(err: SearchLogError) -> Self {
        error!("Error fetching recent searches: {}", err);
        Self::DatabaseError(messages::RECENT_FAILED.to_string())
    }
}
