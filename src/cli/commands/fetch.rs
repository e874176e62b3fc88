use crate::cli::output::{action, success};
use crate::core::config::Config;
use crate::download::{download_to_file, pbdb_taxa_url, DownloadOptions};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct FetchArgs {
    /// Root taxon of the export (e.g. Trilobita, Brachiopoda)
    #[arg(default_value = "Metazoa")]
    pub base_name: String,

    /// Destination file
    #[arg(short, long, value_name = "FILE", default_value = "pbdb_taxa.csv")]
    pub output: PathBuf,

    /// Override the PBDB taxa service URL
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "600")]
    pub timeout: u64,
}

pub fn run(args: FetchArgs, config: &Config) -> anyhow::Result<()> {
    let mut source = config.source.clone();
    if let Some(url) = args.url {
        source.base_url = url;
    }
    let url = pbdb_taxa_url(&source, &args.base_name)?;

    action(&format!("Fetching taxa under {} from {}", args.base_name, url));
    let options = DownloadOptions {
        timeout: Duration::from_secs(args.timeout),
        show_progress: config.resolution.show_progress,
    };
    let bytes = download_to_file(url.as_str(), &args.output, &options)
        .with_context(|| format!("Failed to download {}", url))?;

    success(&format!("Saved {} bytes to {}", bytes, args.output.display()));
    Ok(())
}
