use crate::cli::commands::audit::{audit_options, emit_report};
use crate::cli::commands::resolve::{print_resolution_summary, resolve_file};
use crate::core::auditor::audit;
use crate::core::config::Config;
use crate::report::table::write_lineages_to_path;
use crate::report::ReportFormat;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// PBDB taxa export (CSV, vocab=pbdb)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Lineage table to write
    #[arg(long, value_name = "FILE", default_value = "lineages.csv")]
    pub lineages: PathBuf,

    /// Audit report to write
    #[arg(long, value_name = "FILE", default_value = "audit_report.txt")]
    pub report: PathBuf,

    /// Report format (text, json)
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Do not report genera whose duplicates are all subgenera
    #[arg(long)]
    pub no_subgenera: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run(args: RunArgs, config: &Config) -> anyhow::Result<()> {
    let batch = resolve_file(&args.input, config, args.no_progress)?;

    write_lineages_to_path(&args.lineages, &batch.lineages, config.output.delimiter_byte()?)
        .with_context(|| format!("Failed to write lineage table {}", args.lineages.display()))?;
    print_resolution_summary(&batch, &args.lineages);

    let report = audit(&batch.lineages, &audit_options(config, args.no_subgenera));
    emit_report(&report, args.format, Some(args.report.as_path()))
}
