//! Test helpers for webserver tests
//!
//! `FakeSource` answers every upstream call the same way (a body, an error,
//! or never) and counts calls dropped before they finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use orchestrator::{Orchestrator, RandomnessSource, WorkerError};
use shared::{ServerConfig, UpstreamConfig};
use webserver::WebServer;

/// Plain-text body with five integers (population stddev ≈ 1.4142)
pub const FIVE_INTEGERS: &[u8] = b"1\n2\n3\n4\n5\n";

#[derive(Clone, Debug)]
enum Reply {
    Body(Vec<u8>),
    Error(WorkerError),
    Hang,
}

pub struct FakeSource {
    reply: Reply,
    calls: AtomicUsize,
    abandoned: AtomicUsize,
}

impl FakeSource {
    fn with_reply(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            abandoned: AtomicUsize::new(0),
        })
    }

    pub fn responding(body: &[u8]) -> Arc<Self> {
        Self::with_reply(Reply::Body(body.to_vec()))
    }

    pub fn failing(error: WorkerError) -> Arc<Self> {
        Self::with_reply(Reply::Error(error))
    }

    pub fn hanging() -> Arc<Self> {
        Self::with_reply(Reply::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

/// Bumps `abandoned` when dropped mid-call
struct Abandon<'a>(&'a AtomicUsize);

impl Drop for Abandon<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RandomnessSource for FakeSource {
    async fn fetch(&self, _url: &Url) -> Result<Vec<u8>, WorkerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Error(error) => Err(error.clone()),
            Reply::Hang => {
                let _abandon = Abandon(&self.abandoned);
                std::future::pending().await
            }
        }
    }
}

pub struct TestHelpers;

impl TestHelpers {
    /// Upstream base URL that is never contacted by fake sources
    pub const FAKE_UPSTREAM: &'static str = "http://upstream.test/integers/";

    pub fn server_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..ServerConfig::default()
        }
    }

    pub fn upstream_config() -> UpstreamConfig {
        UpstreamConfig::with_base_url(Self::FAKE_UPSTREAM)
            .unwrap()
            .with_timeout(Duration::from_secs(5))
    }

    pub fn webserver(source: Arc<FakeSource>, config: ServerConfig) -> WebServer<FakeSource> {
        let orchestrator = Orchestrator::with_shared_source(source, Self::upstream_config());
        WebServer::new(orchestrator, config)
    }

    pub fn router(source: Arc<FakeSource>) -> Router {
        Self::webserver(source, Self::server_config()).build_router()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Send one request through the router and decode the JSON body
    pub async fn call(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router.oneshot(Self::get(uri)).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    /// Poll `condition` every 10ms until it holds or `timeout_ms` elapses
    pub async fn wait_for_condition<F>(mut condition: F, timeout_ms: u64) -> bool
    where
        F: FnMut() -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if condition() {
                return true;
            }
            if tokio::time::Instant::now() > deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}
