#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    response::Response,
    routing::any,
};
use http::{Method, StatusCode};
use voca_config::TranscriptionConfig;

pub use error::{ProviderError, Result, TranscriptionError};
pub use provider::SttProvider;
pub use server::Server;
pub use types::{AudioUpload, ProviderTranscript, SegmentInfo, Transcription, TranscriptionResult, WordInfo};

use server::TranscriptionServerBuilder;

/// Methods advertised in CORS responses for the transcription endpoint
pub const ALLOWED_METHODS: &[Method] = &[Method::POST, Method::OPTIONS];

/// Build the transcription server from configuration
///
/// A missing API key is not an error here; requests report it instead.
///
/// # Errors
///
/// Returns an error if the upstream HTTP client cannot be built
pub fn build_server(config: &TranscriptionConfig) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TranscriptionServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for transcription
///
/// Every method reaches the handler so that non-POST requests get the JSON
/// envelope rather than a bare 405.
pub fn endpoint_router(config: &TranscriptionConfig) -> Router<Arc<Server>> {
    Router::new().route(&config.path, any(transcribe))
}

/// Handle transcription requests
async fn transcribe(State(server): State<Arc<Server>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    if parts.method == Method::OPTIONS {
        return voca_core::empty_response(StatusCode::OK);
    }

    match server.transcribe(&parts.method, body).await {
        Ok(transcription) => {
            tracing::debug!("Transcription complete");
            voca_core::json_response(StatusCode::OK, &TranscriptionResult::succeeded(transcription))
        }
        Err(e) => voca_core::json_response(e.status_code(), &TranscriptionResult::failed(&e)),
    }
}
