//! WebServer-specific error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::OrchestratorError;
use shared::SharedError;
use thiserror::Error;

use crate::types::ErrorBody;

/// Error code returned for rejected query parameters
pub const QUERY_PARAMS_ERROR: &str = "QUERY_PARAMS_ERROR";

/// Error code returned when the fan-out fails
pub const RANDOM_ORG_ACCESS_ERROR: &str = "RANDOM_ORG_ACCESS_ERROR";

/// Error code returned when the server itself misbehaves
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("Orchestrator error: {0}")]
    OrchestratorError(#[from] OrchestratorError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;

/// Errors returned to HTTP callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing, malformed or out-of-range query parameters
    #[error("Invalid query params. Please check your inputs")]
    InvalidQuery,

    /// The fan-out failed; carries the first observed cause
    #[error("{0}")]
    UpstreamAccess(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery => StatusCode::BAD_REQUEST,
            ApiError::UpstreamAccess(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidQuery => QUERY_PARAMS_ERROR,
            ApiError::UpstreamAccess(_) => RANDOM_ORG_ACCESS_ERROR,
            ApiError::Internal(_) => INTERNAL_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(error: OrchestratorError) -> Self {
        match error {
            OrchestratorError::RequestFailed(cause) => ApiError::UpstreamAccess(cause.to_string()),
            other @ (OrchestratorError::CallerDisconnected | OrchestratorError::WorkerLost { .. }) => {
                ApiError::UpstreamAccess(other.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
