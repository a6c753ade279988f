use serde::{Serialize, Serializer};

use crate::error::TranscriptionError;

/// File name the uploaded audio is sent under
pub const UPLOAD_FILE_NAME: &str = "audio.m4a";

/// MIME type the uploaded audio is sent as
pub const UPLOAD_CONTENT_TYPE: &str = "audio/mp4";

/// Raw audio handed to a provider
#[derive(Debug)]
pub struct AudioUpload {
    pub audio: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl AudioUpload {
    /// Wrap a request body the way every upload is labelled
    pub fn m4a(audio: Vec<u8>) -> Self {
        Self {
            audio,
            filename: UPLOAD_FILE_NAME.to_string(),
            content_type: UPLOAD_CONTENT_TYPE.to_string(),
        }
    }
}

/// What a provider returns on success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTranscript {
    pub text: String,
}

/// Response envelope for the transcription endpoint
///
/// Built only through [`TranscriptionResult::succeeded`] or
/// [`TranscriptionResult::failed`], so exactly one of `transcription` and
/// `error` is present.
#[derive(Debug, Serialize)]
pub struct TranscriptionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcription: Option<Transcription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    timestamp: String,
}

impl TranscriptionResult {
    pub fn succeeded(transcription: Transcription) -> Self {
        Self {
            success: true,
            transcription: Some(transcription),
            error: None,
            details: None,
            timestamp: voca_core::utc_timestamp(),
        }
    }

    pub fn failed(error: &TranscriptionError) -> Self {
        Self {
            success: false,
            transcription: None,
            error: Some(error.to_string()),
            details: error.details(),
            timestamp: voca_core::utc_timestamp(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn transcription(&self) -> Option<&Transcription> {
        self.transcription.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

/// Transcript payload of a successful response
#[derive(Debug, Clone, Serialize)]
pub struct Transcription {
    pub text: String,
    pub language: String,
    #[serde(serialize_with = "whole_seconds_as_integer")]
    pub duration: f64,
    pub words: Vec<WordInfo>,
    pub segments: Vec<SegmentInfo>,
}

impl Transcription {
    /// Map upstream text onto the response shape
    ///
    /// Only the text is carried over. Language is reported as `english`,
    /// duration as 0, and word and segment timings stay empty even though the
    /// upstream is asked for them.
    pub fn from_text(text: String) -> Self {
        Self {
            text,
            language: "english".to_string(),
            duration: 0.0,
            words: Vec::new(),
            segments: Vec::new(),
        }
    }
}

/// Word-level timing
#[derive(Debug, Clone, Serialize)]
pub struct WordInfo {
    pub word: String,
    pub start: f32,
    pub end: f32,
}

/// Segment-level timing
#[derive(Debug, Clone, Serialize)]
pub struct SegmentInfo {
    pub id: u32,
    pub text: String,
    pub start: f32,
    pub end: f32,
}

/// Write `12.0` as `12` so clients see the same numbers the upstream sends
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation, clippy::float_cmp)]
fn whole_seconds_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
