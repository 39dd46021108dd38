//! Shared types for the random-mean service
//!
//! Contains the data model that flows between the fan-out orchestrator and
//! the HTTP layer, plus configuration, errors and logging helpers used by
//! every crate in the workspace.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::{ServerConfig, UpstreamConfig};
pub use errors::*;
pub use types::*;
