//! Extraction result types

use serde::Serialize;

/// Result of extracting text from a lease document
#[derive(Debug, Clone, Serialize)]
pub struct ExtractResult {
    /// The extracted, whitespace-trimmed text
    pub text: String,

    /// Source path or label
    pub source: String,

    /// Name of the strategy that produced the text
    pub strategy: &'static str,

    /// Whether the fallback strategy had to be used
    pub used_fallback: bool,

    /// Number of pages the strategy reported
    pub page_count: usize,

    /// Original document size in bytes
    pub original_length: usize,

    /// Extracted text length in characters
    pub text_length: usize,
}

impl ExtractResult {
    /// Create a new extraction result
    pub fn new(text: String, source: impl Into<String>, strategy: &'static str) -> Self {
        let text_length = text.chars().count();
        Self {
            text,
            source: source.into(),
            strategy,
            used_fallback: false,
            page_count: 0,
            original_length: 0,
            text_length,
        }
    }

    /// Mark the result as produced by the fallback strategy
    pub fn with_fallback(mut self, used_fallback: bool) -> Self {
        self.used_fallback = used_fallback;
        self
    }

    /// Set the page count
    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.page_count = pages;
        self
    }

    /// Set the original length
    pub fn with_original_length(mut self, length: usize) -> Self {
        self.original_length = length;
        self
    }

    /// Whether the text meets a caller-chosen minimum length
    pub fn has_min_chars(&self, min_chars: usize) -> bool {
        self.text_length >= min_chars
    }
}
