pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "paleotax",
    version,
    about = "Genus lineage reconstruction and duplicate auditing for PBDB taxa exports",
    long_about = "paleotax rebuilds the full higher taxonomy and age range of every genus and \
                  subgenus in a Paleobiology Database taxa export, then audits the result for \
                  suspicious duplicate genera, homonyms and subgenus groupings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    /// Configuration file (defaults to $PALEOTAX_HOME/config.toml)
    #[arg(short, long, global = true, env = "PALEOTAX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a taxa export from the Paleobiology Database
    Fetch(commands::fetch::FetchArgs),

    /// Reconstruct genus lineages from a taxa export
    Resolve(commands::resolve::ResolveArgs),

    /// Audit a lineage table for duplicate genera and homonyms
    Audit(commands::audit::AuditArgs),

    /// Resolve lineages and audit them in one pass
    Run(commands::run::RunArgs),

    /// Filter the geologic time scale and compute interval midpoints
    Intervals(commands::intervals::IntervalsArgs),

    /// Show or initialise the configuration file
    Config(commands::config::ConfigArgs),
}
