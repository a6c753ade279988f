use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::ProviderError,
    http_client::http_client,
    types::{AudioUpload, ProviderTranscript},
};

use super::SttProvider;

const MODEL: &str = "whisper-1";
const LANGUAGE: &str = "en";
const RESPONSE_FORMAT: &str = "verbose_json";
const TIMESTAMP_GRANULARITIES: [&str; 2] = ["word", "segment"];

/// `OpenAI` Whisper transcription API
pub(crate) struct WhisperProvider {
    client: Client,
    endpoint: String,
    api_key: SecretString,
}

impl WhisperProvider {
    pub fn new(api_key: SecretString, base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    fn form(upload: AudioUpload) -> Result<reqwest::multipart::Form, ProviderError> {
        let file = reqwest::multipart::Part::bytes(upload.audio)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)
            .map_err(|e| ProviderError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", MODEL)
            .text("language", LANGUAGE)
            .text("response_format", RESPONSE_FORMAT);

        for granularity in TIMESTAMP_GRANULARITIES {
            form = form.text("timestamp_granularities[]", granularity);
        }

        Ok(form)
    }
}

/// Fields read from a `verbose_json` response
#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[derive(serde::Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(serde::Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

/// Message to relay for a non-success response
///
/// Prefers the `error.message` of an `OpenAI` error body, then the raw body,
/// then the status line.
fn api_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<OpenAiErrorBody>(body) {
        return parsed.error.message;
    }

    let body = body.trim();
    if body.is_empty() { status.to_string() } else { body.to_string() }
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, upload: AudioUpload) -> Result<ProviderTranscript, ProviderError> {
        tracing::debug!("Whisper transcription request: {} bytes, model={MODEL}", upload.audio.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(Self::form(upload)?)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                ProviderError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &body);

            tracing::error!("Whisper API error ({status}): {message}");

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            ProviderError::InvalidResponse(format!("Failed to parse transcription response: {e}"))
        })?;

        tracing::debug!("Whisper transcription complete");

        Ok(ProviderTranscript { text: result.text })
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
