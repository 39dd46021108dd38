//! Command line arguments

use std::time::Duration;

use clap::Parser;
use shared::config::DEFAULT_UPSTREAM_URL;
use shared::{ServerConfig, UpstreamConfig};

use crate::error::WebServerResult;

#[derive(Parser, Debug, Clone)]
#[command(name = "random-mean")]
#[command(about = "Fan-out random integer sampler with per-sample standard deviation")]
pub struct Args {
    /// Interface to bind
    #[arg(long, env = "RANDOM_MEAN_HOST", default_value = "localhost")]
    pub host: String,

    /// HTTP port
    #[arg(long, env = "RANDOM_MEAN_PORT", default_value = "8090")]
    pub port: u16,

    /// Randomness provider endpoint
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Per-call upstream timeout in seconds
    #[arg(long, default_value = "5")]
    pub timeout_secs: u64,

    /// Largest accepted `requests` query value
    #[arg(long, default_value = "1000")]
    pub max_requests: u32,

    /// Largest accepted `length` query value
    #[arg(long, default_value = "10000")]
    pub max_length: u32,

    /// Round stddev in responses to this many decimals
    #[arg(long)]
    pub round_decimals: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn upstream_config(&self) -> WebServerResult<UpstreamConfig> {
        let config = UpstreamConfig::with_base_url(&self.upstream_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.validate()?;
        Ok(config)
    }

    pub fn server_config(&self) -> WebServerResult<ServerConfig> {
        let config = ServerConfig {
            host: self.host.clone(),
            port: self.port,
            max_requests: self.max_requests,
            max_length: self.max_length,
            round_decimals: self.round_decimals,
        };
        config.validate()?;
        Ok(config)
    }
}
