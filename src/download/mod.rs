/// Remote data sources: the PBDB taxa export and the interval reference table
use crate::core::config::SourceConfig;
use crate::{PaleotaxError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Output blocks requested from the PBDB taxa service
const PBDB_SHOW: &str = "full,app,parent";

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub timeout: Duration,
    pub show_progress: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            show_progress: true,
        }
    }
}

fn client(options: &DownloadOptions) -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .user_agent(concat!("paleotax/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Build the PBDB data service URL listing every taxon under `base_name`
pub fn pbdb_taxa_url(source: &SourceConfig, base_name: &str) -> Result<Url> {
    Url::parse_with_params(
        &source.base_url,
        &[
            ("base_name", base_name),
            ("show", PBDB_SHOW),
            ("vocab", "pbdb"),
        ],
    )
    .map_err(|e| PaleotaxError::Config(format!("Invalid PBDB URL '{}': {}", source.base_url, e)))
}

fn get(url: &str, options: &DownloadOptions) -> Result<reqwest::blocking::Response> {
    tracing::debug!("GET {}", url);
    let response = client(options)?.get(url).send()?;
    if !response.status().is_success() {
        return Err(PaleotaxError::Network(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }
    Ok(response)
}

/// Stream `url` to `dest`, returning the number of bytes written
pub fn download_to_file(url: &str, dest: &Path, options: &DownloadOptions) -> Result<u64> {
    let response = get(url, options)?;

    let pb = if !options.show_progress {
        ProgressBar::hidden()
    } else if let Some(len) = response.content_length() {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.green} {bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    pb.set_message(format!("Downloading to {}", dest.display()));

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // `dest` only appears once the whole body is on disk
    let partial = partial_path(dest);
    let mut reader = pb.wrap_read(response);
    let copied = File::create(&partial).map_err(PaleotaxError::from).and_then(|file| {
        let mut writer = BufWriter::new(file);
        let bytes = std::io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        Ok(bytes)
    });
    pb.finish_and_clear();

    let bytes = match copied {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = std::fs::remove_file(&partial);
            return Err(e);
        }
    };
    std::fs::rename(&partial, dest)?;
    tracing::info!("Downloaded {} bytes from {} to {}", bytes, url, dest.display());
    Ok(bytes)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// Fetch the interval reference table as CSV text
pub fn fetch_intervals(url: &str, options: &DownloadOptions) -> Result<String> {
    let mut body = String::new();
    get(url, options)?.read_to_string(&mut body)?;
    Ok(body)
}
