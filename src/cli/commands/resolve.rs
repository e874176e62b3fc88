use crate::bio::occurrence::{candidates, OccurrenceTable};
use crate::cli::output::{format_number, info, section_header_with_line, success, tree_item, warning};
use crate::core::config::Config;
use crate::core::resolver::{LineageResolver, ResolutionBatch};
use crate::report::table::write_lineages_to_path;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ResolveArgs {
    /// PBDB taxa export (CSV, vocab=pbdb)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Lineage table to write
    #[arg(short, long, value_name = "FILE", default_value = "lineages.csv")]
    pub output: PathBuf,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run(args: ResolveArgs, config: &Config) -> anyhow::Result<()> {
    let batch = resolve_file(&args.input, config, args.no_progress)?;

    write_lineages_to_path(&args.output, &batch.lineages, config.output.delimiter_byte()?)
        .with_context(|| format!("Failed to write lineage table {}", args.output.display()))?;

    print_resolution_summary(&batch, &args.output);
    Ok(())
}

/// Load a taxa export and resolve every genus and subgenus in it
pub fn resolve_file(input: &Path, config: &Config, no_progress: bool) -> anyhow::Result<ResolutionBatch> {
    let table = OccurrenceTable::from_path(input, &config.source)
        .with_context(|| format!("Failed to load taxa from {}", input.display()))?;

    let candidates = candidates(&table);
    info(&format!(
        "Resolving {} genus and subgenus entries from {} rows",
        format_number(candidates.len()),
        format_number(table.len())
    ));

    let resolver = LineageResolver::new(&table).with_silent(no_progress || !config.resolution.show_progress);
    Ok(resolver.resolve_all(&candidates))
}

pub fn print_resolution_summary(batch: &ResolutionBatch, output: &Path) {
    section_header_with_line("Lineage Resolution");
    tree_item(false, "Resolved", Some(&format_number(batch.lineages.len())));
    tree_item(false, "Failed", Some(&format_number(batch.failure_count())));
    tree_item(true, "Output", Some(&output.display().to_string()));

    if batch.is_complete() {
        success("All candidates resolved");
    } else {
        warning(&format!(
            "{} candidates could not be resolved (run with -v for details)",
            batch.failure_count()
        ));
    }
}
