use crate::cli::output::success;
use crate::core::config::{default_config, save_config, Config};
use crate::core::paths::config_path;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Destination (defaults to $PALEOTAX_HOME/config.toml)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the default configuration file location
    Path,
}

pub fn run(args: ConfigArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommand::Init { path, force } => {
            let path = path.unwrap_or_else(config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            save_config(&path, &default_config())?;
            success(&format!("Wrote default configuration to {}", path.display()));
        }
        ConfigCommand::Path => {
            println!("{}", config_path().display());
        }
    }
    Ok(())
}
