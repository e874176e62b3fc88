use crate::core::auditor::AuditReport;
use crate::Result;
use std::fmt::Write;

/// Plain-text audit report: the summary line, then one line per finding
pub fn generate_text_report(report: &AuditReport) -> Result<String> {
    let mut output = String::new();

    writeln!(&mut output, "{}", report.summary_line()).map_err(fmt_error)?;
    for finding in &report.findings {
        writeln!(&mut output, "{}", finding).map_err(fmt_error)?;
    }

    Ok(output)
}

fn fmt_error(e: std::fmt::Error) -> crate::PaleotaxError {
    crate::PaleotaxError::Other(format!("Failed to format report: {}", e))
}
