pub mod bio;
pub mod cli;
pub mod core;
pub mod download;
pub mod report;
pub mod utils;

pub use crate::bio::occurrence::{OccurrenceTable, TaxonIndex, TaxonRecord};
pub use crate::bio::taxonomy::{Lineage, TaxonomicRank};
pub use crate::core::auditor::{audit, AuditOptions, AuditReport, Finding};
pub use crate::core::resolver::{resolve_lineage, LineageResolver, ResolutionBatch, ResolveError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaleotaxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for PaleotaxError {
    fn from(err: reqwest::Error) -> Self {
        PaleotaxError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PaleotaxError {
    fn from(err: serde_json::Error) -> Self {
        PaleotaxError::Other(format!("JSON serialization failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PaleotaxError>;
