use serde::Serialize;

use crate::HealthState;

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub service: String,
    pub version: String,
    pub region: String,
    pub uptime: String,
}

impl HealthStatus {
    /// Snapshot of the service as of this request
    pub fn capture(state: &HealthState) -> Self {
        Self {
            status: "healthy",
            timestamp: voca_core::utc_timestamp(),
            service: state.service.clone(),
            version: state.version.clone(),
            region: state.region.clone(),
            uptime: state.started.uptime(),
        }
    }
}
