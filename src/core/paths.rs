use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static PALEOTAX_HOME: OnceLock<PathBuf> = OnceLock::new();

/// Get the paleotax home directory
/// Checks PALEOTAX_HOME environment variable, falls back to ${HOME}/.paleotax
pub fn paleotax_home() -> PathBuf {
    PALEOTAX_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("PALEOTAX_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".paleotax")
            }
        })
        .clone()
}

/// Default location of the user configuration file
pub fn config_path() -> PathBuf {
    paleotax_home().join("config.toml")
}
