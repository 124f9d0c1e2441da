//! Report renderer

use crate::escape::escape_html;
use crate::options::ReportOptions;
use lease_analyzer::score::safety_score;
use lease_analyzer::{AnalysisRecord, Priority, RiskLevel, Severity};
use std::fmt::Write as _;

const NO_SUMMARY: &str = "No summary available";
const NO_NEXT_STEPS: &str = "Consult with a legal professional";

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            line-height: 1.6;
            max-width: 900px;
            margin: 40px auto;
            padding: 20px;
            color: #333;
        }
        .header {
            text-align: center;
            margin-bottom: 40px;
            padding: 20px;
            background: linear-gradient(135deg, #8F001A 0%, #6B0013 100%);
            color: white;
            border-radius: 10px;
        }
        .score { font-size: 72px; font-weight: bold; margin: 20px 0; }
        .risk-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            margin: 10px 0;
        }
        .risk-low { background: #22c55e; color: white; }
        .risk-medium { background: #f59e0b; color: white; }
        .risk-high { background: #ef4444; color: white; }
        .risk-critical { background: #7f1d1d; color: white; }
        .section {
            margin: 30px 0;
            padding: 20px;
            background: #f9fafb;
            border-radius: 8px;
            border-left: 4px solid #8F001A;
        }
        .section-title { font-size: 24px; font-weight: bold; color: #8F001A; margin-bottom: 15px; }
        .item {
            margin: 15px 0;
            padding: 15px;
            background: white;
            border-radius: 6px;
            border: 1px solid #e5e7eb;
        }
        .severity {
            display: inline-block;
            padding: 4px 12px;
            border-radius: 4px;
            font-size: 12px;
            font-weight: bold;
            margin-left: 10px;
        }
        .severity-high { background: #fee2e2; color: #991b1b; }
        .severity-medium { background: #fef3c7; color: #92400e; }
        .severity-low { background: #dbeafe; color: #1e3a8a; }
        .quote {
            background: #f3f4f6;
            padding: 10px;
            border-left: 3px solid #9ca3af;
            margin: 10px 0;
            font-style: italic;
        }
        .recommendation {
            background: #ecfdf5;
            padding: 15px;
            border-left: 3px solid #10b981;
            margin: 10px 0;
        }
        .scam-alert {
            background: #fee2e2;
            border: 2px solid #dc2626;
            padding: 20px;
            border-radius: 8px;
            margin: 20px 0;
        }
        .good-point {
            background: #ecfdf5;
            padding: 10px;
            border-left: 3px solid #10b981;
            margin: 5px 0;
        }
"#;

fn risk_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low | RiskLevel::Unknown => "risk-low",
        RiskLevel::Medium => "risk-medium",
        RiskLevel::High => "risk-high",
        RiskLevel::Critical => "risk-critical",
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "severity-low",
        Severity::Medium => "severity-medium",
        Severity::High => "severity-high",
    }
}

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "severity-low",
        Priority::Medium => "severity-medium",
        Priority::High => "severity-high",
    }
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}

/// Renders analysis records with a fixed set of [`ReportOptions`]
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    options: ReportOptions,
}

impl ReportRenderer {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Render `record` as a standalone HTML document.
    ///
    /// The score shown in the header is always recomputed from the record.
    pub fn render(&self, record: &AnalysisRecord, filename: &str) -> String {
        let mut html = String::with_capacity(16 * 1024);
        self.head(&mut html);
        self.header(&mut html, record, filename);

        if record.is_likely_scam {
            html.push_str(
                r#"
    <div class="scam-alert">
        <h2>⚠️ SCAM ALERT</h2>
        <p><strong>This lease shows signs of being a potential scam. DO NOT SIGN or send money.</strong></p>
    </div>
"#,
            );
        }

        self.scam_indicators(&mut html, record);
        self.legal_violations(&mut html, record);
        self.red_flags(&mut html, record);
        self.concerning_clauses(&mut html, record);
        self.financial_red_flags(&mut html, record);
        self.missing_clauses(&mut html, record);
        self.good_points(&mut html, record);
        self.recommendations(&mut html, record);
        self.summary(&mut html, record);
        self.footer(&mut html);

        html.push_str("</body>\n</html>\n");
        html
    }

    fn head(&self, html: &mut String) {
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <title>{}</title>\n    <style>{}    </style>\n</head>\n<body>\n",
            escape_html(&self.options.title),
            STYLE
        );
    }

    fn header(&self, html: &mut String, record: &AnalysisRecord, filename: &str) {
        let level = record.overall_risk_level;
        let _ = write!(
            html,
            r#"    <div class="header">
        <h1>🏠 {title}</h1>
        <p>{subtitle}</p>
        <p><strong>File:</strong> {filename}</p>
        <div class="score">{score}</div>
        <p>Safety Score</p>
        <span class="risk-badge {class}">{level} RISK</span>
    </div>
"#,
            title = escape_html(&self.options.title),
            subtitle = escape_html(&self.options.subtitle),
            filename = escape_html(filename),
            score = safety_score(record),
            class = risk_class(level),
            level = level.as_str(),
        );
    }

    fn open_section(html: &mut String, title: &str) {
        let _ = write!(
            html,
            "    <div class=\"section\"><div class=\"section-title\">{}</div>\n",
            title
        );
    }

    fn close_section(html: &mut String) {
        html.push_str("    </div>\n");
    }

    fn scam_indicators(&self, html: &mut String, record: &AnalysisRecord) {
        if record.scam_indicators.is_empty() {
            return;
        }
        Self::open_section(html, "🚨 Scam Indicators");
        for indicator in &record.scam_indicators {
            let _ = write!(
                html,
                r#"    <div class="item">
        <strong>{}</strong>
        <span class="severity {}">{}</span>
        <p>{}</p>
    </div>
"#,
                escape_html(&indicator.indicator),
                severity_class(indicator.severity),
                indicator.severity.as_str(),
                escape_html(&indicator.explanation),
            );
        }
        Self::close_section(html);
    }

    fn legal_violations(&self, html: &mut String, record: &AnalysisRecord) {
        if record.legal_violations.is_empty() {
            return;
        }
        Self::open_section(html, "⚖️ Legal Violations");
        for violation in &record.legal_violations {
            let _ = write!(
                html,
                r#"    <div class="item">
        <strong>{}</strong>
        <span class="severity {}">{}</span>
        <div class="quote">"{}"</div>
        <p><strong>Explanation:</strong> {}</p>
        <p><strong>Your Rights:</strong> {}</p>
        <div class="recommendation">
            <strong>Action Required:</strong> {}
        </div>
    </div>
"#,
                escape_html(&violation.violation),
                severity_class(violation.severity),
                violation.severity.as_str(),
                escape_html(&violation.clause),
                escape_html(&violation.explanation),
                escape_html(&violation.tenant_rights),
                escape_html(&violation.action),
            );
        }
        Self::close_section(html);
    }

    fn red_flags(&self, html: &mut String, record: &AnalysisRecord) {
        if record.red_flags.is_empty() {
            return;
        }
        Self::open_section(html, "🚩 Red Flags");
        for flag in &record.red_flags {
            let _ = write!(
                html,
                r#"    <div class="item">
        <strong>{}</strong>
        <span class="severity {}">{}</span>
        <div class="quote">"{}"</div>
        <p>{}</p>
        <div class="recommendation">
            <strong>Recommendation:</strong> {}
        </div>
    </div>
"#,
                escape_html(&flag.issue),
                severity_class(flag.severity),
                flag.severity.as_str(),
                escape_html(&flag.clause),
                escape_html(&flag.explanation),
                escape_html(&flag.recommendation),
            );
        }
        Self::close_section(html);
    }

    fn concerning_clauses(&self, html: &mut String, record: &AnalysisRecord) {
        if record.concerning_clauses.is_empty() {
            return;
        }
        Self::open_section(html, "🔍 Concerning Clauses");
        for clause in &record.concerning_clauses {
            let _ = write!(
                html,
                r#"    <div class="item">
        <div class="quote">"{}"</div>
        <p><strong>Concern:</strong> {}</p>
        <p><strong>Impact:</strong> {}</p>
        <div class="recommendation">
            <strong>Negotiation Tip:</strong> {}
        </div>
    </div>
"#,
                escape_html(&clause.clause),
                escape_html(&clause.concern),
                escape_html(&clause.impact),
                escape_html(&clause.negotiation_tip),
            );
        }
        Self::close_section(html);
    }

    fn financial_red_flags(&self, html: &mut String, record: &AnalysisRecord) {
        if record.financial_red_flags.is_empty() {
            return;
        }
        Self::open_section(html, "💰 Financial Red Flags");
        for flag in &record.financial_red_flags {
            let _ = write!(
                html,
                r#"    <div class="item">
        <strong>{}</strong>
        <p><strong>Details:</strong> {}</p>
        <p><strong>{} Standard:</strong> {}</p>
        <p><strong>Risk:</strong> {}</p>
    </div>
"#,
                escape_html(&flag.issue),
                escape_html(&flag.details),
                escape_html(&self.options.region),
                escape_html(&flag.standard),
                escape_html(&flag.risk),
            );
        }
        Self::close_section(html);
    }

    fn missing_clauses(&self, html: &mut String, record: &AnalysisRecord) {
        if record.missing_clauses.is_empty() {
            return;
        }
        Self::open_section(html, "📄 Missing Clauses");
        for missing in &record.missing_clauses {
            let _ = write!(
                html,
                r#"    <div class="item">
        <strong>{}</strong>
        <p><strong>Why it matters:</strong> {}</p>
        <div class="recommendation">
            <strong>Request:</strong> {}
        </div>
    </div>
"#,
                escape_html(&missing.missing_item),
                escape_html(&missing.importance),
                escape_html(&missing.recommendation),
            );
        }
        Self::close_section(html);
    }

    fn good_points(&self, html: &mut String, record: &AnalysisRecord) {
        if record.good_points.is_empty() {
            return;
        }
        Self::open_section(html, "✅ Positive Aspects");
        for point in &record.good_points {
            let _ = writeln!(html, "    <div class=\"good-point\">{}</div>", escape_html(point));
        }
        Self::close_section(html);
    }

    fn recommendations(&self, html: &mut String, record: &AnalysisRecord) {
        if record.recommendations.is_empty() {
            return;
        }
        Self::open_section(html, "📋 Recommendations");
        for rec in &record.recommendations {
            let _ = write!(
                html,
                r#"    <div class="item">
        <strong>{}</strong>
        <span class="severity {}">{} PRIORITY</span>
        <p>{}</p>
    </div>
"#,
                escape_html(&rec.action),
                priority_class(rec.priority),
                rec.priority.as_str(),
                escape_html(&rec.explanation),
            );
        }
        Self::close_section(html);
    }

    fn summary(&self, html: &mut String, record: &AnalysisRecord) {
        let _ = write!(
            html,
            r#"    <div class="section">
        <div class="section-title">📝 Summary</div>
        <p>{}</p>
        <p><strong>Recommendation:</strong> {}</p>
        <div class="recommendation">
            <strong>Next Steps:</strong> {}
        </div>
    </div>
"#,
            escape_html(or_placeholder(&record.overall_summary, NO_SUMMARY)),
            record.should_sign.as_str(),
            escape_html(or_placeholder(&record.next_steps, NO_NEXT_STEPS)),
        );
    }

    fn footer(&self, html: &mut String) {
        html.push_str(
            r#"    <div class="section">
        <div class="section-title">ℹ️ Important Information</div>
        <p>This analysis is provided by AI and should not be considered legal advice.
        For specific legal concerns, please consult with:</p>
        <ul>
"#,
        );
        for resource in &self.options.resources {
            match &resource.contact {
                Some(contact) => {
                    let _ = writeln!(
                        html,
                        "            <li><strong>{}:</strong> {}</li>",
                        escape_html(&resource.name),
                        escape_html(contact)
                    );
                }
                None => {
                    let _ = writeln!(
                        html,
                        "            <li><strong>{}</strong></li>",
                        escape_html(&resource.name)
                    );
                }
            }
        }
        html.push_str("        </ul>\n    </div>\n");
    }
}

/// Render `record` with the default report options
pub fn render(record: &AnalysisRecord, filename: &str) -> String {
    ReportRenderer::default().render(record, filename)
}
