pub mod auditor;
pub mod config;
pub mod paths;
pub mod resolver;
pub mod timescale;

pub use auditor::{audit, AuditOptions, AuditReport, Finding};
pub use config::Config;
pub use resolver::{LineageResolver, ResolutionBatch, ResolveError};
