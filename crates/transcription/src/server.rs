use std::sync::Arc;

use axum::body::Body;
use http::Method;
use secrecy::ExposeSecret;
use voca_config::TranscriptionConfig;

use crate::{
    error::{Result, TranscriptionError},
    provider::{SttProvider, whisper::WhisperProvider},
    types::{AudioUpload, Transcription},
};

/// Transcription proxy state shared by all requests
pub struct Server {
    /// `None` when no API key is configured
    provider: Option<Arc<dyn SttProvider>>,
    max_body_bytes: usize,
}

impl Server {
    /// Create a server around an explicit provider
    pub fn new(provider: Option<Arc<dyn SttProvider>>, max_body_bytes: usize) -> Self {
        Self {
            provider,
            max_body_bytes,
        }
    }

    /// Name of the configured provider, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|provider| provider.name())
    }

    /// Run one request through method check, credential check, body read and
    /// the upstream call
    pub(crate) async fn transcribe(&self, method: &Method, body: Body) -> Result<Transcription> {
        if *method != Method::POST {
            return Err(TranscriptionError::MethodNotAllowed);
        }

        let provider = self.provider.as_ref().ok_or(TranscriptionError::MissingApiKey)?;

        let audio = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|e| TranscriptionError::BodyRead(e.to_string()))?;

        tracing::debug!("Received {} bytes of audio for provider {}", audio.len(), provider.name());

        let transcript = provider
            .transcribe(AudioUpload::m4a(Vec::from(audio)))
            .await
            .map_err(|e| {
                tracing::error!(provider = provider.name(), error = ?e, "transcription failed");
                TranscriptionError::Provider(e)
            })?;

        Ok(Transcription::from_text(transcript.text))
    }
}

/// Builder for constructing the transcription server from configuration
pub(crate) struct TranscriptionServerBuilder<'a> {
    config: &'a TranscriptionConfig,
}

impl<'a> TranscriptionServerBuilder<'a> {
    pub fn new(config: &'a TranscriptionConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Server> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty());

        let provider: Option<Arc<dyn SttProvider>> = match api_key {
            Some(api_key) => {
                let whisper = WhisperProvider::new(api_key.clone(), &self.config.base_url, self.config.timeout())
                    .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

                tracing::debug!(base_url = %self.config.base_url, "Whisper provider initialized");
                Some(Arc::new(whisper))
            }
            None => {
                tracing::warn!("OPENAI_API_KEY is not set, transcription requests will fail until it is configured");
                None
            }
        };

        Ok(Server::new(provider, self.config.max_body_bytes))
    }
}
