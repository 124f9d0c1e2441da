//! Analysis record schema
//!
//! Every field is optional on the way in. Missing lists decode as empty,
//! malformed enums decode as their documented default, and free text
//! decodes as an empty string.

use crate::de::{self, Finding, Label};
use serde::{Deserialize, Deserializer, Serialize};

/// Overall risk level of a lease.
///
/// Absent or unrecognised values decode as [`RiskLevel::Unknown`], which
/// scores like [`RiskLevel::Low`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }
}

impl Label for RiskLevel {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "LOW" => Some(RiskLevel::Low),
            "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH" => Some(RiskLevel::High),
            "CRITICAL" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

/// Severity of a single finding. Defaults to [`Severity::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl Label for Severity {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "LOW" => Some(Severity::Low),
            "MEDIUM" => Some(Severity::Medium),
            "HIGH" | "CRITICAL" => Some(Severity::High),
            _ => None,
        }
    }
}

/// Priority of a recommendation. Defaults to [`Priority::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl Label for Priority {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "HIGH" => Some(Priority::High),
            "MEDIUM" => Some(Priority::Medium),
            "LOW" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// Whether the tenant should sign. Defaults to [`SignRecommendation::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignRecommendation {
    Yes,
    No,
    ProceedWithCaution,
    #[default]
    Unknown,
}

impl SignRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignRecommendation::Yes => "YES",
            SignRecommendation::No => "NO",
            SignRecommendation::ProceedWithCaution => "PROCEED_WITH_CAUTION",
            SignRecommendation::Unknown => "UNKNOWN",
        }
    }
}

impl Label for SignRecommendation {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "YES" => Some(SignRecommendation::Yes),
            "NO" => Some(SignRecommendation::No),
            "PROCEED_WITH_CAUTION" | "CAUTION" => Some(SignRecommendation::ProceedWithCaution),
            _ => None,
        }
    }
}

macro_rules! lenient_label_deserialize {
    ($($ty:ty),*) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    de::label(deserializer)
                }
            }
        )*
    };
}

lenient_label_deserialize!(RiskLevel, Severity, Priority, SignRecommendation);

/// A sign that the listing or lease may be fraudulent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScamIndicator {
    #[serde(deserialize_with = "de::text")]
    pub indicator: String,
    pub severity: Severity,
    #[serde(deserialize_with = "de::text")]
    pub explanation: String,
}

/// A clause that conflicts with a statutory provision
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalViolation {
    #[serde(deserialize_with = "de::text")]
    pub clause: String,
    #[serde(deserialize_with = "de::text")]
    pub violation: String,
    pub severity: Severity,
    #[serde(deserialize_with = "de::text")]
    pub explanation: String,
    #[serde(deserialize_with = "de::text")]
    pub tenant_rights: String,
    #[serde(deserialize_with = "de::text")]
    pub action: String,
}

/// A legal but suspicious or exploitative clause
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlag {
    #[serde(deserialize_with = "de::text")]
    pub issue: String,
    #[serde(deserialize_with = "de::text")]
    pub clause: String,
    pub severity: Severity,
    #[serde(deserialize_with = "de::text")]
    pub explanation: String,
    #[serde(deserialize_with = "de::text")]
    pub recommendation: String,
}

/// A legal clause that disadvantages the tenant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcerningClause {
    #[serde(deserialize_with = "de::text")]
    pub clause: String,
    #[serde(deserialize_with = "de::text")]
    pub concern: String,
    #[serde(deserialize_with = "de::text")]
    pub impact: String,
    #[serde(deserialize_with = "de::text")]
    pub negotiation_tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingClause {
    #[serde(deserialize_with = "de::text")]
    pub missing_item: String,
    #[serde(deserialize_with = "de::text")]
    pub importance: String,
    #[serde(deserialize_with = "de::text")]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRedFlag {
    #[serde(deserialize_with = "de::text")]
    pub issue: String,
    #[serde(deserialize_with = "de::text")]
    pub details: String,
    #[serde(deserialize_with = "de::text")]
    pub standard: String,
    #[serde(deserialize_with = "de::text")]
    pub risk: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub priority: Priority,
    #[serde(deserialize_with = "de::text")]
    pub action: String,
    #[serde(deserialize_with = "de::text")]
    pub explanation: String,
}

macro_rules! bare_text_finding {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Finding for $ty {
                fn from_text(text: String) -> Self {
                    Self {
                        $field: text,
                        ..Default::default()
                    }
                }
            }
        )*
    };
}

bare_text_finding!(
    ScamIndicator => indicator,
    LegalViolation => violation,
    RedFlag => issue,
    ConcerningClause => clause,
    MissingClause => missing_item,
    FinancialRedFlag => issue,
    Recommendation => action,
);

/// Structured result of analysing one lease
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub overall_risk_level: RiskLevel,

    #[serde(deserialize_with = "de::percent")]
    pub confidence_score: u8,

    #[serde(deserialize_with = "de::flag")]
    pub is_likely_scam: bool,

    #[serde(deserialize_with = "de::list")]
    pub scam_indicators: Vec<ScamIndicator>,

    #[serde(deserialize_with = "de::list")]
    pub legal_violations: Vec<LegalViolation>,

    #[serde(deserialize_with = "de::list")]
    pub red_flags: Vec<RedFlag>,

    #[serde(deserialize_with = "de::list")]
    pub concerning_clauses: Vec<ConcerningClause>,

    #[serde(deserialize_with = "de::list")]
    pub missing_clauses: Vec<MissingClause>,

    #[serde(deserialize_with = "de::text_list")]
    pub good_points: Vec<String>,

    #[serde(deserialize_with = "de::list")]
    pub financial_red_flags: Vec<FinancialRedFlag>,

    #[serde(deserialize_with = "de::list")]
    pub recommendations: Vec<Recommendation>,

    #[serde(deserialize_with = "de::text")]
    pub overall_summary: String,

    pub should_sign: SignRecommendation,

    #[serde(deserialize_with = "de::text")]
    pub next_steps: String,

    /// Set by the scorer, never by the model
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::optional_percent"
    )]
    pub safety_score: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_decodes_to_defaults() {
        let record: AnalysisRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, AnalysisRecord::default());
        assert_eq!(record.overall_risk_level, RiskLevel::Unknown);
        assert_eq!(record.should_sign, SignRecommendation::Unknown);
        assert!(record.legal_violations.is_empty());
        assert_eq!(record.safety_score, None);
    }

    #[test]
    fn test_enums_are_lenient() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{
                "overall_risk_level": "high",
                "should_sign": "Proceed with caution",
                "red_flags": [{"issue": "Key fee", "severity": "LOW/MEDIUM/HIGH"}],
                "recommendations": [{"priority": "low", "action": "Ask for receipt"}]
            }"#,
        )
        .unwrap();

        assert_eq!(record.overall_risk_level, RiskLevel::High);
        assert_eq!(record.should_sign, SignRecommendation::ProceedWithCaution);
        assert_eq!(record.red_flags[0].severity, Severity::Medium);
        assert_eq!(record.recommendations[0].priority, Priority::Low);
    }

    #[test]
    fn test_null_and_wrong_typed_lists_are_empty() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{"legal_violations": null, "red_flags": "none", "good_points": ["Heat included"]}"#,
        )
        .unwrap();

        assert!(record.legal_violations.is_empty());
        assert!(record.red_flags.is_empty());
        assert_eq!(record.good_points, vec!["Heat included".to_string()]);
    }

    #[test]
    fn test_bare_entries_keep_their_count() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{
                "legal_violations": ["Illegal deposit", "No-pet clause"],
                "red_flags": [null],
                "missing_clauses": ["Repair timelines"],
                "recommendations": ["Ask for a receipt"]
            }"#,
        )
        .unwrap();

        assert_eq!(record.legal_violations.len(), 2);
        assert_eq!(record.legal_violations[0].violation, "Illegal deposit");
        assert_eq!(record.legal_violations[1].severity, Severity::Medium);
        assert_eq!(record.red_flags, vec![RedFlag::default()]);
        assert_eq!(record.missing_clauses[0].missing_item, "Repair timelines");
        assert_eq!(record.recommendations[0].action, "Ask for a receipt");
    }

    #[test]
    fn test_partial_items_default_missing_fields() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{"legal_violations": [{"clause": "No pets allowed", "severity": "HIGH"}]}"#,
        )
        .unwrap();

        let violation = &record.legal_violations[0];
        assert_eq!(violation.clause, "No pets allowed");
        assert_eq!(violation.severity, Severity::High);
        assert_eq!(violation.tenant_rights, "");
    }

    #[test]
    fn test_serializes_with_wire_labels() {
        let record = AnalysisRecord {
            overall_risk_level: RiskLevel::Critical,
            should_sign: SignRecommendation::ProceedWithCaution,
            safety_score: Some(12),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["overall_risk_level"], "CRITICAL");
        assert_eq!(json["should_sign"], "PROCEED_WITH_CAUTION");
        assert_eq!(json["safety_score"], 12);
    }

    #[test]
    fn test_score_omitted_until_set() {
        let json = serde_json::to_value(AnalysisRecord::default()).unwrap();
        assert!(json.get("safety_score").is_none());
    }
}
