//! Orchestrator-specific error types

use shared::SharedError;
use thiserror::Error;

/// Classification of a single worker failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    UpstreamUnavailable,
    TransportError,
    BodyReadError,
    ParseError,
    /// Internal only: the shared token was cancelled before the worker finished
    Canceled,
}

/// Failure reported by one worker.
///
/// The `Display` text is surfaced verbatim to the caller as the cause of a
/// failed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("RandomORG request timeout")]
    Timeout,

    #[error("Service RandomORG is not available: {status}")]
    UpstreamUnavailable { status: String },

    #[error("RandomORG request failed: {message}")]
    Transport { message: String },

    #[error("Failed to read RandomORG response: {message}")]
    BodyRead { message: String },

    #[error("Failed to parse RandomORG response: {reason}")]
    Parse { reason: String },

    #[error("Request canceled")]
    Canceled,
}

impl WorkerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkerError::Timeout => ErrorKind::Timeout,
            WorkerError::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            WorkerError::Transport { .. } => ErrorKind::TransportError,
            WorkerError::BodyRead { .. } => ErrorKind::BodyReadError,
            WorkerError::Parse { .. } => ErrorKind::ParseError,
            WorkerError::Canceled => ErrorKind::Canceled,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, WorkerError::Canceled)
    }
}

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("{0}")]
    RequestFailed(#[from] WorkerError),

    #[error("Caller disconnected before all workers reported")]
    CallerDisconnected,

    #[error("Worker exited without reporting: expected {expected} outcomes, received {received}")]
    WorkerLost { expected: u32, received: u32 },

    #[error("HTTP client construction failed: {message}")]
    ClientBuild { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
