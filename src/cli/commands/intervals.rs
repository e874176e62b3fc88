use crate::core::config::Config;
use crate::core::timescale::{write_midpoints, IntervalLevel, IntervalTable};
use crate::download::{fetch_intervals, DownloadOptions};
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Args)]
pub struct IntervalsArgs {
    /// Granularity to keep (eon, era, period, epoch, age)
    #[arg(short, long, default_value = "period")]
    pub level: IntervalLevel,

    /// Append one more interval by name (e.g. Holocene)
    #[arg(short, long)]
    pub append: Option<String>,

    /// Read intervals from a local CSV instead of downloading them
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output CSV (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: IntervalsArgs, config: &Config) -> anyhow::Result<()> {
    let table = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            IntervalTable::from_reader(file, &config.timescale)?
        }
        None => {
            let options = DownloadOptions {
                show_progress: false,
                ..Default::default()
            };
            let body = fetch_intervals(&config.timescale.url, &options)
                .with_context(|| format!("Failed to download intervals from {}", config.timescale.url))?;
            IntervalTable::from_reader(body.as_bytes(), &config.timescale)?
        }
    };

    let selected = table.select(args.level, args.append.as_deref())?;
    tracing::info!("Selected {} intervals at level {}", selected.len(), args.level);

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            write_midpoints(BufWriter::new(file), &selected)?;
        }
        None => write_midpoints(std::io::stdout().lock(), &selected)?,
    }
    Ok(())
}
