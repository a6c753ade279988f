pub(crate) mod whisper;

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    types::{AudioUpload, ProviderTranscript},
};

/// Upstream speech-to-text service
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Transcribe one uploaded audio file
    async fn transcribe(&self, upload: AudioUpload) -> Result<ProviderTranscript, ProviderError>;

    /// Get the provider name
    fn name(&self) -> &str;
}
