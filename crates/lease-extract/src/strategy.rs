//! PDF text extraction strategies

use crate::error::{ExtractError, Result};
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Separator appended after every page of text
pub const PAGE_SEPARATOR: &str = "\n\n";

/// A way of reading per-page text out of a PDF
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs and results
    fn name(&self) -> &'static str;

    /// Read the text of every page, in page order
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;

    /// Join page texts into one trimmed blob.
    ///
    /// Every page is followed by a blank line, including pages that
    /// yielded nothing.
    fn assemble(&self, pages: &[String]) -> String {
        let mut text = String::new();
        for page in pages {
            text.push_str(page);
            text.push_str(PAGE_SEPARATOR);
        }
        text.trim().to_string()
    }
}

/// Layout-aware extraction through `pdf-extract`.
///
/// `pdf-extract` can panic on malformed input, so calls run inside
/// [`std::panic::catch_unwind`] and panics surface as [`ExtractError::Pdf`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutStrategy;

impl LayoutStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStrategy for LayoutStrategy {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));
        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractError::from(e)),
            Err(_) => Err(ExtractError::Pdf(
                "layout extraction panicked (malformed document)".to_string(),
            )),
        }
    }

    /// Pages without text are skipped entirely.
    fn assemble(&self, pages: &[String]) -> String {
        let mut text = String::new();
        for page in pages.iter().filter(|p| !p.is_empty()) {
            text.push_str(page);
            text.push_str(PAGE_SEPARATOR);
        }
        text.trim().to_string()
    }
}

/// Plain page iteration over a `lopdf` document
#[derive(Debug, Default, Clone, Copy)]
pub struct PageWalkStrategy;

impl PageWalkStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStrategy for PageWalkStrategy {
    fn name(&self) -> &'static str {
        "page-walk"
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages();
        debug!(pages = pages.len(), "walking PDF pages");

        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            texts.push(doc.extract_text(&[*page_num])?);
        }
        Ok(texts)
    }
}
