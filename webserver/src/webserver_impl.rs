//! Main webserver implementation
//!
//! Owns the router and the listener. Handlers reach the orchestrator through
//! [`WebServerState`].

use std::future::Future;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use orchestrator::{Orchestrator, RandomnessSource};
use shared::{ComponentId, ServerConfig, component_info, logging};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers;

/// HTTP front end over an [`Orchestrator`]
pub struct WebServer<S> {
    state: WebServerState<S>,
}

impl<S> WebServer<S>
where
    S: RandomnessSource + 'static,
{
    pub fn new(orchestrator: Orchestrator<S>, config: ServerConfig) -> Self {
        Self {
            state: WebServerState::new(orchestrator, config),
        }
    }

    pub fn state(&self) -> &WebServerState<S> {
        &self.state
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/random/mean", get(handlers::random_mean::<S>))
            .route("/health", get(handlers::health_check::<S>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.state.config.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            WebServerError::ServerStartup(format!("Failed to bind to {address}: {e}"))
        })?;
        self.run_with_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// In-flight requests finish before this returns.
    pub async fn run_with_listener<F>(&self, listener: TcpListener, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let component = ComponentId::WebServer;
        let local = listener.local_addr()?;
        logging::log_startup(component, &format!("HTTP server on http://{local}"));
        component_info!(
            component,
            max_requests = self.state.config.max_requests,
            max_length = self.state.config.max_length,
            upstream = %self.state.orchestrator.config().base_url,
            "Serving /random/mean"
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("HTTP server error: {e}")))?;

        logging::log_shutdown(component, "HTTP server stopped");
        Ok(())
    }
}
