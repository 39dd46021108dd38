//! REST API handlers
//!
//! `GET /random/mean` runs one fan-out request; `GET /health` reports
//! liveness.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use orchestrator::RandomnessSource;
use shared::{ComponentId, RequestId, component_info, component_warn};

use crate::error::ApiError;
use crate::state::WebServerState;
use crate::types::{RandomMeanQuery, StatisticEntry};

/// Fan out `requests` upstream calls of `length` integers each.
///
/// The orchestrator runs in its own task. If the client disconnects, axum
/// drops this future, the drop guard cancels the caller token, and the
/// orchestrator cancels and drains its workers without anyone awaiting it.
pub async fn random_mean<S>(
    State(state): State<WebServerState<S>>,
    query: Result<Query<RandomMeanQuery>, QueryRejection>,
) -> Result<Json<Vec<StatisticEntry>>, ApiError>
where
    S: RandomnessSource + 'static,
{
    let component = ComponentId::WebServer;

    let Query(query) = query.map_err(|rejection| {
        component_warn!(component, reason = %rejection, "Rejected query parameters");
        ApiError::InvalidQuery
    })?;
    let spec = query.validate(&state.config).inspect_err(|_| {
        component_warn!(
            component,
            requests = query.requests,
            length = query.length,
            "Query parameters out of range"
        );
    })?;

    let request_id = RequestId::new();
    component_info!(
        component,
        request_id = %request_id,
        requests = spec.worker_count,
        length = spec.quantity_per_worker,
        "Handling random mean request"
    );

    let caller = CancellationToken::new();
    let disconnect_guard = caller.clone().drop_guard();

    let orchestrator = Arc::clone(&state.orchestrator);
    let run = tokio::spawn(async move { orchestrator.run(request_id, spec, caller).await });

    let outcome = run.await.map_err(|e| {
        component_warn!(component, request_id = %request_id, error = %e, "Orchestrator task failed");
        ApiError::Internal(format!("request {request_id} aborted"))
    })?;
    disconnect_guard.disarm();

    match outcome {
        Ok(report) => Ok(Json(state.assembler.assemble(&report))),
        Err(error) => {
            component_warn!(component, request_id = %request_id, error = %error, "Random mean request failed");
            Err(ApiError::from(error))
        }
    }
}

/// Health check endpoint
pub async fn health_check<S>(State(state): State<WebServerState<S>>) -> Json<Value>
where
    S: RandomnessSource + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.get_uptime_seconds(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
