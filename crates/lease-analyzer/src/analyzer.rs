//! Analysis requester

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::errors::{AnalysisError, Result};
use crate::parse::parse_response;
use crate::prompt::{build_prompt, Jurisdiction};
use crate::record::AnalysisRecord;
use crate::score;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Upper bound on reply length; room for the full schema with several
/// entries per list
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Sampling settings for the analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    pub model: String,
    pub max_tokens: u32,
    /// 0.0 for deterministic output
    pub temperature: f32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }
}

impl AnalyzerSettings {
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AnalysisError::Configuration("model name is empty".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(AnalysisError::Configuration(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(AnalysisError::Configuration(format!(
                "temperature {} is outside 0.0..=1.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Sends lease text to a model and turns the reply into an [`AnalysisRecord`].
///
/// The backend is injected, so tests can substitute a fake service. Each
/// call makes one upstream request; nothing is retried or cached.
#[derive(Clone)]
pub struct LeaseAnalyzer {
    backend: Arc<dyn CompletionBackend>,
    settings: AnalyzerSettings,
    jurisdiction: Jurisdiction,
}

impl LeaseAnalyzer {
    /// Create an analyzer with default settings and jurisdiction
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            settings: AnalyzerSettings::default(),
            jurisdiction: Jurisdiction::default(),
        }
    }

    pub fn builder(backend: Arc<dyn CompletionBackend>) -> LeaseAnalyzerBuilder {
        LeaseAnalyzerBuilder::new(backend)
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    /// Build the request that [`analyze`](Self::analyze) would send
    pub fn request_for(&self, lease_text: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            prompt: build_prompt(lease_text, &self.jurisdiction),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Analyze lease text. The returned record has no `safety_score`.
    pub async fn analyze(&self, lease_text: &str) -> Result<AnalysisRecord> {
        let request = self.request_for(lease_text);
        info!(
            backend = self.backend.name(),
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "requesting lease analysis"
        );

        let reply = self.backend.complete(&request).await.map_err(|e| {
            warn!(backend = self.backend.name(), error = %e, "analysis request failed");
            AnalysisError::from(e)
        })?;
        debug!(reply_chars = reply.len(), "received analysis reply");

        parse_response(&reply).map_err(|e| {
            warn!(error = %e, "could not decode analysis reply");
            debug!(raw = %reply, "raw analysis reply");
            e
        })
    }

    /// Analyze lease text and merge the safety score into the record
    pub async fn analyze_and_score(&self, lease_text: &str) -> Result<AnalysisRecord> {
        let mut record = self.analyze(lease_text).await?;
        let score = score::apply(&mut record);
        info!(
            risk = record.overall_risk_level.as_str(),
            likely_scam = record.is_likely_scam,
            safety_score = score,
            "lease analysis complete"
        );
        Ok(record)
    }
}

impl std::fmt::Debug for LeaseAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseAnalyzer")
            .field("backend", &self.backend.name())
            .field("settings", &self.settings)
            .field("jurisdiction", &self.jurisdiction)
            .finish()
    }
}

/// Builder for [`LeaseAnalyzer`]
pub struct LeaseAnalyzerBuilder {
    backend: Arc<dyn CompletionBackend>,
    settings: AnalyzerSettings,
    jurisdiction: Jurisdiction,
}

impl LeaseAnalyzerBuilder {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            settings: AnalyzerSettings::default(),
            jurisdiction: Jurisdiction::default(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.settings.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.settings.temperature = temperature;
        self
    }

    pub fn settings(mut self, settings: AnalyzerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = jurisdiction;
        self
    }

    /// Validate settings and build the analyzer
    pub fn build(self) -> Result<LeaseAnalyzer> {
        self.settings.validate()?;
        Ok(LeaseAnalyzer {
            backend: self.backend,
            settings: self.settings,
            jurisdiction: self.jurisdiction,
        })
    }
}
