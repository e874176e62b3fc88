/// Duplicate and homonym audit over a resolved lineage table
use crate::bio::taxonomy::{Lineage, TaxonomicRank};
use crate::core::config::AuditConfig;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    /// Report genera whose repeated entries are all its subgenera
    pub report_subgenera: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            report_subgenera: true,
        }
    }
}

impl From<&AuditConfig> for AuditOptions {
    fn from(config: &AuditConfig) -> Self {
        Self {
            report_subgenera: config.report_subgenera,
        }
    }
}

/// Classification of one multi-member genus group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    SubgenusSet { genus: String, subgenera: usize },
    SuspiciousDuplicate { genus: String },
    Homonym { genus: String, classes: [String; 2] },
}

impl Finding {
    pub fn is_warning(&self) -> bool {
        matches!(self, Finding::SuspiciousDuplicate { .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::SubgenusSet { genus, subgenera } => {
                write!(f, "OK: Genus {} has {} subgenera.", genus, subgenera)
            }
            Finding::SuspiciousDuplicate { genus } => write!(
                f,
                "WARNING: Genus {} may be a duplicate genus entry. Investigate and override in PBDB if true.",
                genus
            ),
            Finding::Homonym { genus, classes } => write!(
                f,
                "OK: Genus {} is a homonym for genera in difference classes: {} {}",
                genus, classes[0], classes[1]
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    pub total_rows: usize,
    /// Rows whose genus name occurs more than once
    pub grouped_rows: usize,
    pub groups: usize,
    /// Groups spanning three or more classes, left unclassified
    pub unclassified_groups: usize,
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn duplicate_percentage(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.grouped_rows as f64 / self.total_rows as f64 * 100.0
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{:.2}% of genus entries share their name with at least one other entry.",
            self.duplicate_percentage()
        )
    }

    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_warning()).count()
    }
}

fn column_is_constant(members: &[&Lineage], rank: TaxonomicRank) -> bool {
    match members.split_first() {
        Some((first, rest)) => rest.iter().all(|m| m.rank(rank) == first.rank(rank)),
        None => true,
    }
}

/// Classify every genus name that occurs at least twice.
///
/// Groups are visited in order of each genus' first appearance; the
/// subgenus-set and duplicate checks are independent and may both fire.
pub fn audit(lineages: &[Lineage], options: &AuditOptions) -> AuditReport {
    let mut groups: IndexMap<&str, Vec<&Lineage>> = IndexMap::new();
    for lineage in lineages {
        groups.entry(lineage.genus()).or_default().push(lineage);
    }

    let mut report = AuditReport {
        total_rows: lineages.len(),
        ..Default::default()
    };

    for (genus, members) in groups.iter().filter(|(_, members)| members.len() >= 2) {
        report.groups += 1;
        report.grouped_rows += members.len();

        let classes: IndexSet<&str> = members.iter().map(|m| m.class()).collect();
        match classes.len() {
            1 => {
                let constant = TaxonomicRank::HIGHER
                    .iter()
                    .all(|&rank| column_is_constant(members, rank));

                if options.report_subgenera
                    && constant
                    && members[0].subgenus().is_empty()
                    && members[1..].iter().all(|m| !m.subgenus().is_empty())
                {
                    report.findings.push(Finding::SubgenusSet {
                        genus: genus.to_string(),
                        subgenera: members.len() - 1,
                    });
                }

                if !constant {
                    report.findings.push(Finding::SuspiciousDuplicate {
                        genus: genus.to_string(),
                    });
                }
            }
            2 => {
                report.findings.push(Finding::Homonym {
                    genus: genus.to_string(),
                    classes: [classes[0].to_string(), classes[1].to_string()],
                });
            }
            n => {
                tracing::debug!("Genus {} spans {} classes; not classified", genus, n);
                report.unclassified_groups += 1;
            }
        }
    }

    tracing::info!(
        "Audited {} genus groups: {} findings, {} warnings",
        report.groups,
        report.findings.len(),
        report.warning_count()
    );
    report
}
