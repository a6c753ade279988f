//! Mock transcription upstream for integration tests
//!
//! Serves `POST /v1/audio/transcriptions` the way the `OpenAI` API does,
//! records each multipart request, and answers with a canned reply

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// What the mock answers with
#[derive(Clone)]
enum Reply {
    Text(String),
    Error { status: StatusCode, message: String },
}

/// One multipart request as the upstream saw it
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub fields: Vec<(String, String)>,
    pub file_name: Option<String>,
    pub file_content_type: Option<String>,
    pub file_bytes: Vec<u8>,
}

impl CapturedRequest {
    /// All values sent under `name`, in order
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

struct MockState {
    reply: Reply,
    requests: Mutex<Vec<CapturedRequest>>,
}

/// Mock upstream that returns predictable responses
pub struct MockWhisper {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockWhisper {
    /// Start a mock that transcribes everything as `text`
    pub async fn start_with_text(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(Reply::Text(text.to_owned())).await
    }

    /// Start a mock that fails every request with an `OpenAI` error body
    pub async fn start_failing(status: StatusCode, message: &str) -> anyhow::Result<Self> {
        Self::start_inner(Reply::Error {
            status,
            message: message.to_owned(),
        })
        .await
    }

    async fn start_inner(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockWhisper {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut captured = CapturedRequest {
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        ..CapturedRequest::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();

        if name == "file" {
            captured.file_name = field.file_name().map(str::to_owned);
            captured.file_content_type = field.content_type().map(str::to_owned);
            captured.file_bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        } else {
            let value = field.text().await.unwrap_or_default();
            captured.fields.push((name, value));
        }
    }

    state.requests.lock().unwrap().push(captured);

    match &state.reply {
        Reply::Text(text) => Json(json!({
            "task": "transcribe",
            "language": "english",
            "duration": 1.52,
            "text": text,
            "words": [{ "word": "hello", "start": 0.0, "end": 0.4 }],
            "segments": [{ "id": 0, "text": text, "start": 0.0, "end": 1.52 }]
        }))
        .into_response(),
        Reply::Error { status, message } => (
            *status,
            Json(json!({
                "error": {
                    "message": message,
                    "type": "requests",
                    "param": null,
                    "code": null
                }
            })),
        )
            .into_response(),
    }
}
