use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscriptionError>;

/// Reasons a transcription request ends without a transcript
///
/// The `Display` text is the short summary placed in the envelope's `error`
/// field; [`TranscriptionError::details`] carries the cause.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// Anything but POST (and the OPTIONS preflight)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No upstream credential was configured at startup
    #[error("OpenAI API key not configured")]
    MissingApiKey,

    /// The request body could not be read or was over the size cap
    #[error("Failed to read request body")]
    BodyRead(String),

    /// The upstream API call failed
    #[error("Transcription failed")]
    Provider(#[source] ProviderError),
}

impl TranscriptionError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::MissingApiKey | Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying cause shown to the caller, if any
    ///
    /// Upstream messages pass through verbatim.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::MethodNotAllowed => None,
            Self::MissingApiKey => Some("OPENAI_API_KEY environment variable not set".to_string()),
            Self::BodyRead(cause) => Some(cause.clone()),
            Self::Provider(cause) => Some(cause.to_string()),
        }
    }
}

/// Upstream provider failures
///
/// `Display` renders only the message so it can be relayed as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, TLS, timeout)
    #[error("{0}")]
    Connection(String),

    /// The API answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx with a body we could not decode
    #[error("{0}")]
    InvalidResponse(String),

    /// The outgoing request could not be assembled
    #[error("{0}")]
    InvalidRequest(String),
}
