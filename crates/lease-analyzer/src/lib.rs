//! Lease risk analysis
//!
//! Builds a jurisdiction-specific prompt around extracted lease text, sends
//! it to a language model through a [`CompletionBackend`], parses the
//! semi-structured reply into an [`AnalysisRecord`] and derives a 0-100
//! safety score from it.
//!
//! # Example
//!
//! ```no_run
//! use lease_analyzer::{AnthropicBackend, LeaseAnalyzer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> lease_analyzer::Result<()> {
//!     let backend = AnthropicBackend::from_env(reqwest::Client::new());
//!     let analyzer = LeaseAnalyzer::builder(Arc::new(backend)).build()?;
//!
//!     let record = analyzer.analyze_and_score("RESIDENTIAL TENANCY AGREEMENT ...").await?;
//!     println!("Safety score: {:?}", record.safety_score);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod backend;
mod de;
pub mod errors;
pub mod parse;
pub mod prompt;
pub mod record;
pub mod score;

pub use analyzer::{AnalyzerSettings, LeaseAnalyzer, LeaseAnalyzerBuilder};
pub use backend::{AnthropicBackend, CompletionBackend, CompletionRequest, OpenAiBackend};
pub use errors::{AnalysisError, BackendError, Result};
pub use parse::parse_response;
pub use prompt::{build_prompt, Jurisdiction};
pub use record::{
    AnalysisRecord, ConcerningClause, FinancialRedFlag, LegalViolation, MissingClause, Priority,
    Recommendation, RedFlag, RiskLevel, ScamIndicator, Severity, SignRecommendation,
};
pub use score::{safety_score, ScoreBreakdown, ScoreDeductions};
