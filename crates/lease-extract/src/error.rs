//! Error types for lease text extraction

use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while turning a document into text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A single strategy could not read the PDF
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The document format has no extraction support
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Both the primary and the fallback strategy failed
    #[error("Failed to extract text ({primary_strategy}: {primary}; {fallback_strategy}: {source})")]
    Extraction {
        primary_strategy: &'static str,
        primary: String,
        fallback_strategy: &'static str,
        #[source]
        source: Box<ExtractError>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ExtractError {
    fn from(err: lopdf::Error) -> Self {
        ExtractError::Pdf(err.to_string())
    }
}

impl From<pdf_extract::OutputError> for ExtractError {
    fn from(err: pdf_extract::OutputError) -> Self {
        ExtractError::Pdf(err.to_string())
    }
}
