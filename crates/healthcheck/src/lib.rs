#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod status;
mod uptime;

use std::sync::Arc;

use axum::{Router, extract::State, response::Response, routing::any};
use http::{Method, StatusCode};
use voca_config::HealthConfig;

pub use status::HealthStatus;
pub use uptime::StartTime;

/// Methods advertised in CORS responses for the health endpoint
pub const ALLOWED_METHODS: &[Method] = &[Method::GET, Method::POST, Method::OPTIONS];

/// Read-only data behind every health response
#[derive(Debug)]
pub struct HealthState {
    service: String,
    version: String,
    region: String,
    started: StartTime,
}

/// Build the health state from configuration and the process start time
pub fn build_state(config: &HealthConfig, started: StartTime) -> Arc<HealthState> {
    tracing::debug!(
        service = %config.service,
        version = %config.version,
        region = %config.region,
        "health check initialized"
    );

    Arc::new(HealthState {
        service: config.service.clone(),
        version: config.version.clone(),
        region: config.region.clone(),
        started,
    })
}

/// Create the endpoint router for the health check
///
/// Every method is accepted on the configured path.
pub fn endpoint_router(config: &HealthConfig) -> Router<Arc<HealthState>> {
    Router::new().route(&config.path, any(health_check))
}

/// Handle health check requests
async fn health_check(State(state): State<Arc<HealthState>>, method: Method) -> Response {
    if method == Method::OPTIONS {
        return voca_core::empty_response(StatusCode::NO_CONTENT);
    }

    let status = HealthStatus::capture(&state);

    voca_core::json_response(StatusCode::OK, &status)
}
