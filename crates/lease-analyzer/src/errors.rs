//! Error types for lease analysis

use thiserror::Error;

/// Failures talking to the model provider
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("API key not set for {0}")]
    MissingApiKey(String),

    #[error("Reply had no text content: {0}")]
    NoContent(String),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The model service call failed
    #[error("AI analysis request failed: {0}")]
    Request(#[from] BackendError),

    /// The model replied with something that is not an analysis object.
    ///
    /// `raw` holds the full reply for diagnostics and is deliberately left
    /// out of the display text.
    #[error("Malformed model response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("Analyzer configuration error: {0}")]
    Configuration(String),
}

impl AnalysisError {
    /// The raw model reply, when the error came from parsing it
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AnalysisError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
