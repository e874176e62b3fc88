/// Lineage reconstruction: walks each genus' parent chain up the taxon table
use crate::bio::occurrence::{OccurrenceTable, TaxonId, TaxonIndex};
use crate::bio::taxonomy::{Lineage, TaxonomicRank};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

/// Why a single candidate could not be resolved.
///
/// These never abort a batch; the candidate is left out of the table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("candidate {index} is out of range ({len} candidates)")]
    CandidateOutOfRange { index: usize, len: usize },

    #[error("row {row} is out of range ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("taxon {id}: subgenus name '{name}' is not of the form 'Genus (Subgenus)'")]
    MalformedCompoundName { id: TaxonId, name: String },

    #[error("taxon {id}: parent chain revisits taxon {revisited}")]
    CycleDetected { id: TaxonId, revisited: TaxonId },

    #[error("taxon {id}: missing first or last appearance age")]
    MissingAges { id: TaxonId },

    #[error("taxon {id}: invalid age range {max_ma} to {min_ma} Ma")]
    InvalidAgeRange { id: TaxonId, max_ma: f64, min_ma: f64 },
}

/// Split a subgenus label such as `Acanthopyge (Lobopyge)` into its genus
/// and subgenus parts.
pub fn split_subgenus_name(name: &str) -> Option<(&str, String)> {
    let mut tokens = name.split_whitespace();
    let genus = tokens.next()?;
    let subgenus = tokens.next()?.replace(['(', ')'], "");
    if tokens.next().is_some() || subgenus.is_empty() {
        return None;
    }
    Some((genus, subgenus))
}

/// Resolve the lineage of the taxon at `row`.
///
/// Pure over its inputs: the same table, index and row always give the
/// same result.
pub fn resolve_lineage(
    table: &OccurrenceTable,
    index: &TaxonIndex,
    row: usize,
) -> Result<Lineage, ResolveError> {
    let target = table.get(row).ok_or(ResolveError::RowOutOfRange {
        row,
        len: table.len(),
    })?;
    let id = target.accepted_no;

    let (max_ma, last_min_ma) = match (target.firstapp_max_ma, target.lastapp_min_ma) {
        (Some(max_ma), Some(min_ma)) => (max_ma, min_ma),
        _ => return Err(ResolveError::MissingAges { id }),
    };

    // Pull of the recent: a living taxon ranges up to the present
    let extant = target.is_extant
        || index
            .rows(id)
            .iter()
            .filter_map(|&r| table.get(r))
            .any(|record| record.is_extant);
    let min_ma = if extant { 0.0 } else { last_min_ma };

    if !(max_ma >= min_ma && min_ma >= 0.0) {
        return Err(ResolveError::InvalidAgeRange { id, max_ma, min_ma });
    }

    let mut lineage = Lineage::new(target.accepted_name.as_str(), max_ma, min_ma);

    if target.rank() == Some(TaxonomicRank::Subgenus) {
        let (genus, subgenus) =
            split_subgenus_name(&target.accepted_name).ok_or_else(|| ResolveError::MalformedCompoundName {
                id,
                name: target.accepted_name.clone(),
            })?;
        lineage.set(TaxonomicRank::Genus, genus);
        lineage.set(TaxonomicRank::Subgenus, subgenus);
    }

    let mut visited = HashSet::new();
    visited.insert(id);
    let mut next = target.parent_no;

    while let Some(parent_id) = next {
        if !visited.insert(parent_id) {
            return Err(ResolveError::CycleDetected {
                id,
                revisited: parent_id,
            });
        }

        // A parent missing from the table ends the walk early
        let Some(parent) = index.first(parent_id).and_then(|r| table.get(r)) else {
            tracing::trace!("Taxon {} has a broken parent link to {}", id, parent_id);
            break;
        };

        if let Some(rank) = parent.rank() {
            lineage.set_if_empty(rank, &parent.accepted_name);
        }
        next = parent.parent_no;
    }

    Ok(lineage)
}

/// A candidate that failed to resolve
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionFailure {
    pub row: usize,
    pub error: ResolveError,
}

/// Output of resolving a whole candidate list
#[derive(Debug, Clone, Default)]
pub struct ResolutionBatch {
    pub lineages: Vec<Lineage>,
    pub failures: Vec<ResolutionFailure>,
}

impl ResolutionBatch {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolves candidates against one shared, read-only table
pub struct LineageResolver<'a> {
    table: &'a OccurrenceTable,
    index: TaxonIndex,
    silent: bool,
}

impl<'a> LineageResolver<'a> {
    pub fn new(table: &'a OccurrenceTable) -> Self {
        Self::with_index(table, TaxonIndex::build(table))
    }

    pub fn with_index(table: &'a OccurrenceTable, index: TaxonIndex) -> Self {
        Self {
            table,
            index,
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn resolve(&self, row: usize) -> Result<Lineage, ResolveError> {
        resolve_lineage(self.table, &self.index, row)
    }

    /// Resolve the `position`-th entry of a candidate list
    pub fn resolve_candidate(&self, candidates: &[usize], position: usize) -> Result<Lineage, ResolveError> {
        let row = *candidates.get(position).ok_or(ResolveError::CandidateOutOfRange {
            index: position,
            len: candidates.len(),
        })?;
        self.resolve(row)
    }

    /// Resolve every candidate on the rayon pool.
    ///
    /// Failed candidates are logged and counted; the rest keep their
    /// candidate order.
    pub fn resolve_all(&self, candidates: &[usize]) -> ResolutionBatch {
        let pb = if self.silent {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(candidates.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb.set_message("Resolving lineages");
            pb
        };

        let results: Vec<(usize, Result<Lineage, ResolveError>)> = candidates
            .par_iter()
            .map(|&row| {
                let result = self.resolve(row);
                pb.inc(1);
                (row, result)
            })
            .collect();

        pb.finish_and_clear();

        let mut batch = ResolutionBatch::default();
        for (row, result) in results {
            match result {
                Ok(lineage) => batch.lineages.push(lineage),
                Err(error) => {
                    tracing::warn!("Skipping candidate at row {}: {}", row, error);
                    batch.failures.push(ResolutionFailure { row, error });
                }
            }
        }

        tracing::info!(
            "Resolved {} of {} candidates ({} failed)",
            batch.lineages.len(),
            candidates.len(),
            batch.failure_count()
        );
        batch
    }
}
