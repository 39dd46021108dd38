//! Test fixtures and data for orchestrator tests
//!
//! Consistent upstream bodies and configuration used across all test suites.

use std::time::Duration;

use orchestrator::WorkerError;
use shared::UpstreamConfig;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Upstream base URL that is never contacted by fake sources
    pub const FAKE_UPSTREAM: &'static str = "http://upstream.test/integers/";

    /// Per-call timeout used by the fan-out suites
    pub const TIMEOUT: Duration = Duration::from_secs(5);

    /// Plain-text body with five integers (population stddev ≈ 1.4142)
    pub const FIVE_INTEGERS: &'static [u8] = b"1\n2\n3\n4\n5\n";

    /// Body with a non-numeric token
    pub const GARBLED: &'static [u8] = b"12\nerror\n7\n";

    /// Config pointing at the fake upstream
    pub fn upstream_config() -> UpstreamConfig {
        UpstreamConfig::with_base_url(Self::FAKE_UPSTREAM)
            .unwrap()
            .with_timeout(Self::TIMEOUT)
    }

    /// Config pointing at a live mock server
    pub fn upstream_config_for(base: &str, timeout: Duration) -> UpstreamConfig {
        UpstreamConfig::with_base_url(&format!("{base}/integers/"))
            .unwrap()
            .with_timeout(timeout)
    }

    pub fn unavailable() -> WorkerError {
        WorkerError::UpstreamUnavailable {
            status: "503 Service Unavailable".to_string(),
        }
    }

    pub fn transport_error() -> WorkerError {
        WorkerError::Transport {
            message: "connection reset by peer".to_string(),
        }
    }

    /// `count` integers, newline separated, as the upstream sends them
    pub fn plain_body(count: usize) -> Vec<u8> {
        (1..=count)
            .map(|n| format!("{}\n", (n % 1000) + 1))
            .collect::<String>()
            .into_bytes()
    }
}
