//! # Lease Extract
//!
//! Converts an uploaded lease document into a single plain-text blob.
//!
//! Extraction runs a page-by-page, layout-aware strategy first and falls
//! back to a simpler `lopdf` page walk when the primary strategy fails.
//! The fallback only triggers on failure: a primary strategy that
//! succeeds with no text is returned as-is, and length checks are left to
//! the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lease_extract::TextExtractor;
//! use std::path::Path;
//!
//! fn main() -> lease_extract::Result<()> {
//!     let extractor = TextExtractor::default();
//!     let result = extractor.extract_file(Path::new("lease.pdf"))?;
//!     println!("{} characters via {}", result.text_length, result.strategy);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐  error  ┌──────────────────┐
//! │  Document   │ ──► │ Layout strategy  │ ──────► │ lopdf page walk  │
//! │ (path/bytes)│     │ (pdf-extract)    │         │ (fallback)       │
//! └─────────────┘     └──────────────────┘         └──────────────────┘
//!                              │ ok                         │ ok
//!                              ▼                            ▼
//!                      ┌─────────────────────────────────────────┐
//!                      │          ExtractResult (trimmed)        │
//!                      └─────────────────────────────────────────┘
//! ```

pub mod error;
pub mod extractor;
pub mod format;
pub mod result;
pub mod strategy;

pub use error::{ExtractError, Result};
pub use extractor::TextExtractor;
pub use format::DocumentFormat;
pub use result::ExtractResult;
pub use strategy::{ExtractionStrategy, LayoutStrategy, PageWalkStrategy};
