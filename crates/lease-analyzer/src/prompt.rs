//! Prompt construction

use serde::{Deserialize, Serialize};

/// Legal and demographic framing for the evaluator persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jurisdiction {
    /// Province or state whose tenancy law applies
    pub region: String,

    /// Statute leases are checked against
    pub statute: String,

    /// Who the tenant is, e.g. "a student renting near the University of Ottawa"
    pub audience: String,
}

impl Default for Jurisdiction {
    fn default() -> Self {
        Self {
            region: "Ontario".to_string(),
            statute: "Residential Tenancies Act".to_string(),
            audience: "a student renting near the University of Ottawa".to_string(),
        }
    }
}

/// Build the single user prompt sent to the model.
///
/// The lease text is embedded verbatim and followed by the JSON template
/// the model has to fill.
pub fn build_prompt(lease_text: &str, jurisdiction: &Jurisdiction) -> String {
    let region = &jurisdiction.region;
    let statute = &jurisdiction.statute;
    let audience = &jurisdiction.audience;

    format!(
        r#"You are an expert housing lawyer specializing in {region} tenant law and lease agreements.
Analyze this lease agreement for {audience}.

Your task is to identify:
1. **RED FLAGS**: Illegal, unfair, or highly suspicious clauses
2. **SCAM INDICATORS**: Signs this might be a rental scam
3. **CONCERNING CLAUSES**: Legal but potentially problematic terms
4. **VIOLATIONS**: Specific violations of the {region} {statute}
5. **RECOMMENDATIONS**: Actionable advice for the tenant

Be thorough and specific. For each issue, explain:
- What the clause says
- Why it's problematic
- What the tenant's rights are
- What action they should take

LEASE AGREEMENT:
{lease_text}

Respond ONLY with a JSON object in the following format:
{{
    "overall_risk_level": "LOW/MEDIUM/HIGH/CRITICAL",
    "confidence_score": 0-100,
    "is_likely_scam": true/false,
    "scam_indicators": [
        {{
            "indicator": "Description of scam sign",
            "severity": "LOW/MEDIUM/HIGH",
            "explanation": "Why this indicates a scam"
        }}
    ],
    "legal_violations": [
        {{
            "clause": "Quote from lease",
            "violation": "Which law/act it violates",
            "severity": "LOW/MEDIUM/HIGH",
            "explanation": "Detailed explanation",
            "tenant_rights": "What rights the tenant has",
            "action": "What the tenant should do"
        }}
    ],
    "red_flags": [
        {{
            "issue": "Name of the red flag",
            "clause": "Quote from lease",
            "severity": "LOW/MEDIUM/HIGH",
            "explanation": "Why this is a red flag",
            "recommendation": "What to do about it"
        }}
    ],
    "concerning_clauses": [
        {{
            "clause": "Quote from lease",
            "concern": "What's concerning about it",
            "impact": "How it affects the tenant",
            "negotiation_tip": "How to negotiate this"
        }}
    ],
    "missing_clauses": [
        {{
            "missing_item": "What should be in the lease but isn't",
            "importance": "Why this matters",
            "recommendation": "What to request from landlord"
        }}
    ],
    "good_points": [
        "List of positive aspects of the lease"
    ],
    "financial_red_flags": [
        {{
            "issue": "Financial concern",
            "details": "Specifics",
            "standard": "What's normal in {region}",
            "risk": "Why this is risky"
        }}
    ],
    "recommendations": [
        {{
            "priority": "HIGH/MEDIUM/LOW",
            "action": "Specific action to take",
            "explanation": "Why this is important"
        }}
    ],
    "overall_summary": "2-3 sentence summary of the lease",
    "should_sign": "YES/NO/PROCEED_WITH_CAUTION",
    "next_steps": "What the tenant should do next"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_FIELDS: &[&str] = &[
        "overall_risk_level",
        "confidence_score",
        "is_likely_scam",
        "scam_indicators",
        "legal_violations",
        "red_flags",
        "concerning_clauses",
        "missing_clauses",
        "good_points",
        "financial_red_flags",
        "recommendations",
        "overall_summary",
        "should_sign",
        "next_steps",
    ];

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let lease = "Tenant shall pay {rent} of $1,200\n  on the 1st.";
        let prompt = build_prompt(lease, &Jurisdiction::default());
        assert!(prompt.contains(&format!("LEASE AGREEMENT:\n{lease}\n")));
    }

    #[test]
    fn test_prompt_lists_every_schema_field() {
        let prompt = build_prompt("lease", &Jurisdiction::default());
        for field in SCHEMA_FIELDS {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
        assert!(!prompt.contains("safety_score"));
    }

    #[test]
    fn test_prompt_uses_jurisdiction() {
        let jurisdiction = Jurisdiction {
            region: "British Columbia".to_string(),
            statute: "Residential Tenancy Act".to_string(),
            audience: "a graduate student in Vancouver".to_string(),
        };
        let prompt = build_prompt("lease", &jurisdiction);

        assert!(prompt.contains("specializing in British Columbia tenant law"));
        assert!(prompt.contains("violations of the British Columbia Residential Tenancy Act"));
        assert!(prompt.contains("for a graduate student in Vancouver."));
        assert!(prompt.contains("What's normal in British Columbia"));
        assert!(!prompt.contains("Ontario"));
    }

    #[test]
    fn test_template_is_valid_shape() {
        let prompt = build_prompt("lease", &Jurisdiction::default());
        let start = prompt.find("{\n").unwrap();
        assert!(prompt.ends_with('}'));
        assert!(prompt[start..].contains("\"next_steps\""));
    }
}
