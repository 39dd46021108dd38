//! Webserver library for the random mean service
//!
//! Exposes `GET /random/mean`, validates the query, hands the request to the
//! orchestrator and shapes the outcome into JSON.

pub mod config;
pub mod core;
pub mod error;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use self::core::ResponseAssembler;
pub use config::Args;
pub use error::{ApiError, WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;
