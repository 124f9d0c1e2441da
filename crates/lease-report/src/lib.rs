//! HTML report rendering for lease analyses.
//!
//! [`render()`] turns an [`AnalysisRecord`](lease_analyzer::AnalysisRecord)
//! into one self-contained HTML document with inline styling. It performs
//! no I/O and never fails: absent fields fall back to placeholder text and
//! empty lists drop their section.

mod escape;
pub mod options;
pub mod render;

pub use escape::escape_html;
pub use options::{AdvisoryResource, ReportOptions};
pub use render::{render, ReportRenderer};
