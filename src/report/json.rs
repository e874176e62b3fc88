use crate::core::auditor::AuditReport;
use crate::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: String,
    duplicate_percentage: f64,
    #[serde(flatten)]
    report: &'a AuditReport,
    messages: Vec<String>,
}

/// Audit report as JSON, carrying both structured findings and their text form
pub fn generate_json_report(report: &AuditReport) -> Result<String> {
    let json = JsonReport {
        summary: report.summary_line(),
        duplicate_percentage: report.duplicate_percentage(),
        report,
        messages: report.findings.iter().map(|f| f.to_string()).collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
