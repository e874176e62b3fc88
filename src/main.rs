use clap::Parser;
use colored::*;
use paleotax::cli::{Cli, Commands};
use paleotax::core::config::resolve_config;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // PALEOTAX_LOG sets the default level; RUST_LOG still wins when present
    let default_level = match cli.verbose {
        0 => std::env::var("PALEOTAX_LOG").unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<paleotax::PaleotaxError>() {
            Some(paleotax::PaleotaxError::Config(_)) => 2,
            Some(paleotax::PaleotaxError::Io(_)) => 3,
            Some(paleotax::PaleotaxError::Parse(_))
            | Some(paleotax::PaleotaxError::Csv(_))
            | Some(paleotax::PaleotaxError::MissingColumn(_)) => 4,
            Some(paleotax::PaleotaxError::Network(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    let requested = cli.threads.unwrap_or(config.resolution.threads);
    let num_threads = paleotax::utils::parallel::configure_thread_pool(requested)
        .map_err(|e| anyhow::anyhow!("Failed to initialize thread pool: {}", e))?;
    tracing::debug!("Using {} threads", num_threads);

    match cli.command {
        Commands::Fetch(args) => paleotax::cli::commands::fetch::run(args, &config),
        Commands::Resolve(args) => paleotax::cli::commands::resolve::run(args, &config),
        Commands::Audit(args) => paleotax::cli::commands::audit::run(args, &config),
        Commands::Run(args) => paleotax::cli::commands::run::run(args, &config),
        Commands::Intervals(args) => paleotax::cli::commands::intervals::run(args, &config),
        Commands::Config(args) => paleotax::cli::commands::config::run(args, &config),
    }
}
