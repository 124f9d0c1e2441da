//! Safety score derivation
//!
//! Starts at 100 and subtracts, in order:
//!
//! | Step | Condition                 | Deduction      |
//! |------|---------------------------|----------------|
//! | 1    | `is_likely_scam`          | 80             |
//! | 2    | risk level CRITICAL/HIGH/MEDIUM | 60 / 40 / 20 |
//! | 3    | each legal violation      | 10             |
//! | 4    | each red flag             | 5              |
//! | 5    | each concerning clause    | 3              |
//! | 6    | each financial red flag   | 7              |
//!
//! The result is clamped to 0..=100. Deductions are additive; the clamp is
//! the only nonlinearity.
//!
//! Labels and flags are normalized while decoding, so `"high"` deducts like
//! `"HIGH"` and the string `"false"` is not a scam flag. Scores match an
//! exact-match scorer only for canonical labels and JSON booleans.

use crate::record::{AnalysisRecord, RiskLevel};
use serde::Serialize;

/// The deduction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreDeductions {
    pub likely_scam: i64,
    pub critical_risk: i64,
    pub high_risk: i64,
    pub medium_risk: i64,
    pub per_legal_violation: i64,
    pub per_red_flag: i64,
    pub per_concerning_clause: i64,
    pub per_financial_red_flag: i64,
}

pub const MAX_SCORE: i64 = 100;

pub const DEDUCTIONS: ScoreDeductions = ScoreDeductions {
    likely_scam: 80,
    critical_risk: 60,
    high_risk: 40,
    medium_risk: 20,
    per_legal_violation: 10,
    per_red_flag: 5,
    per_concerning_clause: 3,
    per_financial_red_flag: 7,
};

impl ScoreDeductions {
    fn for_risk_level(&self, level: RiskLevel) -> i64 {
        match level {
            RiskLevel::Critical => self.critical_risk,
            RiskLevel::High => self.high_risk,
            RiskLevel::Medium => self.medium_risk,
            RiskLevel::Low | RiskLevel::Unknown => 0,
        }
    }
}

impl Default for ScoreDeductions {
    fn default() -> Self {
        DEDUCTIONS
    }
}

/// One applied deduction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deduction {
    pub reason: &'static str,
    pub count: usize,
    pub points: i64,
}

/// Step-by-step account of how a score was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub steps: Vec<Deduction>,
    /// Score before clamping; may be negative
    pub raw: i64,
    pub score: u8,
}

impl ScoreBreakdown {
    /// Apply the deduction table to `record`
    pub fn compute(record: &AnalysisRecord, table: &ScoreDeductions) -> Self {
        let scam = usize::from(record.is_likely_scam);
        let risk = table.for_risk_level(record.overall_risk_level);
        let steps = vec![
            Deduction {
                reason: "likely scam",
                count: scam,
                points: table.likely_scam * scam as i64,
            },
            Deduction {
                reason: "overall risk level",
                count: usize::from(risk > 0),
                points: risk,
            },
            Deduction {
                reason: "legal violations",
                count: record.legal_violations.len(),
                points: table.per_legal_violation * record.legal_violations.len() as i64,
            },
            Deduction {
                reason: "red flags",
                count: record.red_flags.len(),
                points: table.per_red_flag * record.red_flags.len() as i64,
            },
            Deduction {
                reason: "concerning clauses",
                count: record.concerning_clauses.len(),
                points: table.per_concerning_clause * record.concerning_clauses.len() as i64,
            },
            Deduction {
                reason: "financial red flags",
                count: record.financial_red_flags.len(),
                points: table.per_financial_red_flag * record.financial_red_flags.len() as i64,
            },
        ];

        let raw = steps.iter().fold(MAX_SCORE, |score, step| score - step.points);
        Self {
            steps,
            raw,
            score: raw.clamp(0, MAX_SCORE) as u8,
        }
    }
}

/// Safety score of `record`, 0 (worst) to 100
pub fn safety_score(record: &AnalysisRecord) -> u8 {
    ScoreBreakdown::compute(record, &DEDUCTIONS).score
}

/// Score `record` and store the result in its `safety_score` field
pub fn apply(record: &mut AnalysisRecord) -> u8 {
    let score = safety_score(record);
    record.safety_score = Some(score);
    score
}
