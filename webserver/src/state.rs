//! Webserver state management
//!
//! State shared by every handler. Per-request coordination state (tokens,
//! channels, worker tasks) is owned by the orchestrator run and never lives
//! here.

use std::sync::Arc;
use std::time::Instant;

use orchestrator::{Orchestrator, RandomnessSource};
use shared::ServerConfig;

use crate::core::ResponseAssembler;

/// Handler state
pub struct WebServerState<S> {
    pub orchestrator: Arc<Orchestrator<S>>,
    pub config: ServerConfig,
    pub assembler: ResponseAssembler,
    pub server_start_time: Instant,
}

impl<S> WebServerState<S>
where
    S: RandomnessSource + 'static,
{
    pub fn new(orchestrator: Orchestrator<S>, config: ServerConfig) -> Self {
        let assembler = ResponseAssembler::with_rounding(config.round_decimals);
        Self {
            orchestrator: Arc::new(orchestrator),
            config,
            assembler,
            server_start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}

// Manual impl: `S` itself need not be `Clone`
impl<S> Clone for WebServerState<S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            config: self.config.clone(),
            assembler: self.assembler,
            server_start_time: self.server_start_time,
        }
    }
}
