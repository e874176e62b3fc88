use crate::cli::output::{format_number, section_header_with_line, success, tree_item, warning};
use crate::core::auditor::{audit, AuditOptions, AuditReport};
use crate::core::config::Config;
use crate::report::table::read_lineages_from_path;
use crate::report::{generate, ReportFormat};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct AuditArgs {
    /// Lineage table written by `paleotax resolve`
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Report file (printed to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (text, json)
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Do not report genera whose duplicates are all subgenera
    #[arg(long)]
    pub no_subgenera: bool,
}

pub fn run(args: AuditArgs, config: &Config) -> anyhow::Result<()> {
    let lineages = read_lineages_from_path(&args.input, config.output.delimiter_byte()?)
        .with_context(|| format!("Failed to read lineage table {}", args.input.display()))?;

    let report = audit(&lineages, &audit_options(config, args.no_subgenera));
    emit_report(&report, args.format, args.output.as_deref())
}

pub fn audit_options(config: &Config, no_subgenera: bool) -> AuditOptions {
    let mut options = AuditOptions::from(&config.audit);
    if no_subgenera {
        options.report_subgenera = false;
    }
    options
}

/// Write the rendered report to `output`, or stdout, and summarise it
pub fn emit_report(report: &AuditReport, format: ReportFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = generate(report, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            print_audit_summary(report, path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn print_audit_summary(report: &AuditReport, path: &Path) {
    section_header_with_line("Duplicate Audit");
    tree_item(false, "Genus entries", Some(&format_number(report.total_rows)));
    tree_item(false, "Shared-name groups", Some(&format_number(report.groups)));
    tree_item(false, "Findings", Some(&format_number(report.findings.len())));
    tree_item(true, "Report", Some(&path.display().to_string()));

    match report.warning_count() {
        0 => success("No suspicious duplicate genera"),
        n => warning(&format!("{} genera may be duplicate entries", n)),
    }
}
