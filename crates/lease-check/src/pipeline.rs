//! Upload-to-record control flow

use crate::validate;
use anyhow::{bail, Context, Result};
use lease_analyzer::{
    AnalysisRecord, AnthropicBackend, CompletionBackend, LeaseAnalyzer, OpenAiBackend,
};
use lease_config::{LeaseCheckConfig, ProviderConfig, ProviderKind};
use lease_extract::{ExtractResult, TextExtractor};
use lease_report::ReportOptions;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// File name used in reports when none is known
pub const DEFAULT_REPORT_FILENAME: &str = "lease.pdf";

pub fn build_backend(provider: &ProviderConfig) -> Result<Arc<dyn CompletionBackend>> {
    let client = reqwest::Client::builder()
        .timeout(provider.timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let api_key = provider.api_key();
    if api_key.is_none() {
        warn!(
            provider = %provider.kind,
            "No API key configured; set {}",
            provider.kind.api_key_env()
        );
    }

    let backend: Arc<dyn CompletionBackend> = match provider.kind {
        ProviderKind::Anthropic => {
            Arc::new(AnthropicBackend::new(client, provider.api_base(), api_key))
        }
        ProviderKind::OpenAi => Arc::new(OpenAiBackend::new(client, provider.api_base(), api_key)),
    };
    Ok(backend)
}

pub struct Pipeline {
    config: LeaseCheckConfig,
    analyzer: LeaseAnalyzer,
}

impl Pipeline {
    /// Pipeline talking to the provider named in `config`
    pub fn from_config(config: LeaseCheckConfig) -> Result<Self> {
        let backend = build_backend(&config.provider)?;
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: LeaseCheckConfig, backend: Arc<dyn CompletionBackend>) -> Result<Self> {
        let analyzer = LeaseAnalyzer::builder(backend)
            .settings(config.provider.analyzer_settings())
            .jurisdiction(config.jurisdiction.clone())
            .build()
            .context("Invalid analyzer settings")?;
        Ok(Self { config, analyzer })
    }

    pub fn report_options(&self) -> ReportOptions {
        report_options(&self.config)
    }

    /// Validate, extract, analyze and score one lease document
    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisRecord> {
        let limits = &self.config.limits;
        validate::check_file(path, limits)?;

        let extracted = extract(path.to_path_buf()).await?;
        info!(
            file = %path.display(),
            strategy = extracted.strategy,
            pages = extracted.page_count,
            chars = extracted.text_length,
            "Extracted lease text"
        );
        validate::check_text(&extracted, limits)?;

        self.analyzer
            .analyze_and_score(&extracted.text)
            .await
            .context("Failed to analyze lease")
    }
}

/// Report labels follow the configured jurisdiction
pub fn report_options(config: &LeaseCheckConfig) -> ReportOptions {
    ReportOptions::default().with_region(config.jurisdiction.region.clone())
}

/// Run the CPU-bound extraction off the async workers
pub async fn extract(path: PathBuf) -> Result<ExtractResult> {
    tokio::task::spawn_blocking(move || TextExtractor::default().extract_file(&path))
        .await
        .context("Extraction task failed")?
        .context("Failed to extract text from document")
}

/// A stored analysis, plus the file name it was produced for when the input
/// carries one, either as a `filename` key beside the record fields or in an
/// `{ "analysis": ..., "filename": ... }` envelope
#[derive(Debug)]
pub struct StoredAnalysis {
    pub record: AnalysisRecord,
    pub filename: Option<String>,
}

fn filename_of(map: &Map<String, Value>) -> Option<String> {
    map.get("filename")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
}

pub fn parse_stored_analysis(json: &str) -> Result<StoredAnalysis> {
    let value: Value = serde_json::from_str(json).context("Analysis file is not valid JSON")?;
    let Value::Object(mut map) = value else {
        bail!("Analysis file must contain a JSON object");
    };

    let filename = filename_of(&map);
    let record = match map.remove("analysis") {
        Some(analysis @ Value::Object(_)) => analysis,
        Some(other) => {
            map.insert("analysis".to_string(), other);
            Value::Object(map)
        }
        None => Value::Object(map),
    };

    let record = serde_json::from_value(record).context("Analysis file does not hold an analysis record")?;
    Ok(StoredAnalysis { record, filename })
}

/// Name shown for `path` in reports
pub fn display_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_REPORT_FILENAME.to_string())
}

/// Pretty JSON of `record` with the analysed file's name merged in as
/// `filename`
pub fn analysis_json(record: &AnalysisRecord, filename: &str) -> Result<String> {
    let mut value = serde_json::to_value(record).context("Failed to serialize analysis")?;
    if let Value::Object(map) = &mut value {
        map.insert("filename".to_string(), Value::String(filename.to_string()));
    }
    serde_json::to_string_pretty(&value).context("Failed to serialize analysis")
}

pub fn read_stored_analysis(path: &Path) -> Result<StoredAnalysis> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_stored_analysis(&json)
}

/// Write `contents` to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = contents.len(), "Wrote output");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;
    use async_trait::async_trait;
    use lease_analyzer::{BackendError, CompletionRequest, RiskLevel};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"overall_risk_level": "LOW"}"#.to_string())
        }
    }

    fn pipeline(config: LeaseCheckConfig) -> (Pipeline, Arc<CountingBackend>) {
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        let pipeline = Pipeline::with_backend(config, backend.clone()).unwrap();
        (pipeline, backend)
    }

    #[tokio::test]
    async fn test_rejected_extension_never_reaches_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lease.txt");
        fs::write(&path, "plain text lease").unwrap();

        let (pipeline, backend) = pipeline(LeaseCheckConfig::default());
        let err = pipeline.analyze_file(&path).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidFileType { .. })
        ));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_processing_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lease.pdf");
        fs::write(&path, b"definitely not a pdf").unwrap();

        let (pipeline, backend) = pipeline(LeaseCheckConfig::default());
        let err = pipeline.analyze_file(&path).await.unwrap_err();

        assert!(err.downcast_ref::<ValidationError>().is_none());
        assert_eq!(err.to_string(), "Failed to extract text from document");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = LeaseCheckConfig::default();
        config.provider.max_tokens = 0;
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        assert!(Pipeline::with_backend(config, backend).is_err());
    }

    #[test]
    fn test_report_options_follow_jurisdiction() {
        let mut config = LeaseCheckConfig::default();
        config.jurisdiction.region = "Quebec".to_string();
        let (pipeline, _) = pipeline(config);
        assert_eq!(pipeline.report_options().region, "Quebec");
    }

    #[test]
    fn test_parse_bare_record() {
        let stored = parse_stored_analysis(r#"{"overall_risk_level": "HIGH", "red_flags": []}"#).unwrap();
        assert_eq!(stored.record.overall_risk_level, RiskLevel::High);
        assert_eq!(stored.filename, None);
    }

    #[test]
    fn test_parse_envelope() {
        let stored = parse_stored_analysis(
            r#"{"analysis": {"overall_risk_level": "CRITICAL", "is_likely_scam": true}, "filename": "sublet.pdf"}"#,
        )
        .unwrap();
        assert_eq!(stored.record.overall_risk_level, RiskLevel::Critical);
        assert!(stored.record.is_likely_scam);
        assert_eq!(stored.filename.as_deref(), Some("sublet.pdf"));
    }

    #[test]
    fn test_analysis_json_round_trips_filename() {
        let record = AnalysisRecord {
            overall_risk_level: RiskLevel::Medium,
            safety_score: Some(80),
            ..Default::default()
        };
        let json = analysis_json(&record, &display_filename(Path::new("/tmp/unit-4b.pdf"))).unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filename"], "unit-4b.pdf");
        assert_eq!(value["overall_risk_level"], "MEDIUM");

        let stored = parse_stored_analysis(&json).unwrap();
        assert_eq!(stored.filename.as_deref(), Some("unit-4b.pdf"));
        assert_eq!(stored.record, record);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_stored_analysis("[1, 2]").is_err());
        assert!(parse_stored_analysis("not json").is_err());
    }

    #[test]
    fn test_build_backend_per_provider() {
        let mut provider = ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        assert_eq!(build_backend(&provider).unwrap().name(), "anthropic");

        provider.kind = ProviderKind::OpenAi;
        assert_eq!(build_backend(&provider).unwrap().name(), "openai");
    }
}
