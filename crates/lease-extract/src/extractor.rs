//! Primary/fallback text extraction

use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;
use crate::result::ExtractResult;
use crate::strategy::{ExtractionStrategy, LayoutStrategy, PageWalkStrategy};
use std::path::Path;
use tracing::{debug, info, warn};

/// Lease text extractor.
///
/// Runs `primary` first and switches to `fallback` only when `primary`
/// returns an error. An empty but successful primary result is returned
/// unchanged.
pub struct TextExtractor {
    primary: Box<dyn ExtractionStrategy>,
    fallback: Box<dyn ExtractionStrategy>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(LayoutStrategy::new(), PageWalkStrategy::new())
    }
}

impl TextExtractor {
    /// Create an extractor from a primary and a fallback strategy
    pub fn new(
        primary: impl ExtractionStrategy + 'static,
        fallback: impl ExtractionStrategy + 'static,
    ) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// Extract text from a document on disk.
    ///
    /// Files whose extension names a known but non-extractable format
    /// (`.doc`, `.docx`) are rejected; anything else is read as PDF.
    pub fn extract_file(&self, path: &Path) -> Result<ExtractResult> {
        if let Some(format) = DocumentFormat::from_path(path) {
            if !format.is_extractable() {
                return Err(ExtractError::UnsupportedFormat(format.to_string()));
            }
        }

        let bytes = std::fs::read(path)?;
        self.extract_bytes(&bytes, path.to_string_lossy())
    }

    /// Extract text from in-memory PDF bytes
    pub fn extract_bytes(&self, bytes: &[u8], source: impl Into<String>) -> Result<ExtractResult> {
        let source = source.into();
        debug!(source = %source, size = bytes.len(), "extracting document text");

        let (strategy, pages, used_fallback) = match self.primary.extract_pages(bytes) {
            Ok(pages) => (&self.primary, pages, false),
            Err(primary_err) => {
                warn!(
                    strategy = self.primary.name(),
                    error = %primary_err,
                    "primary extraction failed, trying {}",
                    self.fallback.name()
                );
                match self.fallback.extract_pages(bytes) {
                    Ok(pages) => (&self.fallback, pages, true),
                    Err(fallback_err) => {
                        return Err(ExtractError::Extraction {
                            primary_strategy: self.primary.name(),
                            primary: primary_err.to_string(),
                            fallback_strategy: self.fallback.name(),
                            source: Box::new(fallback_err),
                        });
                    }
                }
            }
        };

        let text = strategy.assemble(&pages);
        info!(
            strategy = strategy.name(),
            pages = pages.len(),
            chars = text.chars().count(),
            "extracted document text"
        );

        Ok(ExtractResult::new(text, source, strategy.name())
            .with_fallback(used_fallback)
            .with_page_count(pages.len())
            .with_original_length(bytes.len()))
    }
}

impl std::fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextExtractor")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed {
        name: &'static str,
        pages: Option<Vec<&'static str>>,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn ok(name: &'static str, pages: Vec<&'static str>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let strategy = Self {
                name,
                pages: Some(pages),
                calls: calls.clone(),
            };
            (strategy, calls)
        }

        fn failing(name: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let strategy = Self {
                name,
                pages: None,
                calls: calls.clone(),
            };
            (strategy, calls)
        }
    }

    impl ExtractionStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.pages {
                Some(pages) => Ok(pages.iter().map(|p| p.to_string()).collect()),
                None => Err(ExtractError::Pdf(format!("{} exploded", self.name))),
            }
        }
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let (primary, primary_calls) = Fixed::ok("primary", vec!["page one", "page two"]);
        let (fallback, fallback_calls) = Fixed::ok("fallback", vec!["unused"]);
        let extractor = TextExtractor::new(primary, fallback);

        let result = extractor.extract_bytes(b"%PDF", "lease.pdf").unwrap();
        assert_eq!(result.text, "page one\n\npage two");
        assert_eq!(result.strategy, "primary");
        assert!(!result.used_fallback);
        assert_eq!(result.page_count, 2);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_primary_does_not_trigger_fallback() {
        let (primary, _) = Fixed::ok("primary", vec!["", "   "]);
        let (fallback, fallback_calls) = Fixed::ok("fallback", vec!["should not appear"]);
        let extractor = TextExtractor::new(primary, fallback);

        let result = extractor.extract_bytes(b"%PDF", "lease.pdf").unwrap();
        assert_eq!(result.text, "");
        assert!(!result.used_fallback);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_primary_failure_uses_fallback() {
        let (primary, _) = Fixed::failing("primary");
        let (fallback, fallback_calls) = Fixed::ok("fallback", vec!["recovered text"]);
        let extractor = TextExtractor::new(primary, fallback);

        let result = extractor.extract_bytes(b"%PDF", "lease.pdf").unwrap();
        assert_eq!(result.text, "recovered text");
        assert_eq!(result.strategy, "fallback");
        assert!(result.used_fallback);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_both_failing_reports_both_causes() {
        let (primary, _) = Fixed::failing("primary");
        let (fallback, _) = Fixed::failing("fallback");
        let extractor = TextExtractor::new(primary, fallback);

        let err = extractor.extract_bytes(b"%PDF", "lease.pdf").unwrap_err();
        match &err {
            ExtractError::Extraction {
                primary_strategy,
                primary,
                fallback_strategy,
                source,
            } => {
                assert_eq!(*primary_strategy, "primary");
                assert!(primary.contains("primary exploded"));
                assert_eq!(*fallback_strategy, "fallback");
                assert!(source.to_string().contains("fallback exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_docx_is_rejected_before_reading() {
        let extractor = TextExtractor::default();
        let err = extractor
            .extract_file(Path::new("/nonexistent/lease.docx"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref f) if f == "docx"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let extractor = TextExtractor::default();
        let err = extractor
            .extract_file(Path::new("/nonexistent/lease.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
