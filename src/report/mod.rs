use crate::core::auditor::AuditReport;
use crate::Result;
use std::str::FromStr;

pub mod json;
pub mod table;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Render an audit report in the requested format
pub fn generate(report: &AuditReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => text::generate_text_report(report),
        ReportFormat::Json => json::generate_json_report(report),
    }
}
