/// PBDB taxon table: row parsing, identifier index and candidate selection
use crate::bio::taxonomy::TaxonomicRank;
use crate::core::config::SourceConfig;
use crate::{PaleotaxError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub type TaxonId = u32;

/// Literal used by PBDB's `is_extant` column for living taxa
pub const EXTANT_FLAG: &str = "extant";

/// One row of the PBDB taxa export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub accepted_no: TaxonId,
    pub accepted_name: String,
    pub accepted_rank: String,
    pub parent_no: Option<TaxonId>,
    pub firstapp_max_ma: Option<f64>,
    pub lastapp_min_ma: Option<f64>,
    pub is_extant: bool,
    /// Non-empty when the row describes a synonym or otherwise superseded name
    pub difference: String,
}

impl TaxonRecord {
    pub fn new(accepted_no: TaxonId, accepted_name: &str, accepted_rank: &str) -> Self {
        Self {
            accepted_no,
            accepted_name: accepted_name.to_string(),
            accepted_rank: accepted_rank.to_string(),
            parent_no: None,
            firstapp_max_ma: None,
            lastapp_min_ma: None,
            is_extant: false,
            difference: String::new(),
        }
    }

    pub fn with_parent(mut self, parent_no: TaxonId) -> Self {
        self.parent_no = Some(parent_no);
        self
    }

    pub fn with_ages(mut self, firstapp_max_ma: f64, lastapp_min_ma: f64) -> Self {
        self.firstapp_max_ma = Some(firstapp_max_ma);
        self.lastapp_min_ma = Some(lastapp_min_ma);
        self
    }

    pub fn extant(mut self) -> Self {
        self.is_extant = true;
        self
    }

    pub fn with_difference(mut self, difference: &str) -> Self {
        self.difference = difference.to_string();
        self
    }

    /// Position on the fixed scale, if the rank is one of its levels
    pub fn rank(&self) -> Option<TaxonomicRank> {
        TaxonomicRank::parse(&self.accepted_rank)
    }

    pub fn is_valid(&self) -> bool {
        self.difference.trim().is_empty()
    }
}

/// Parse a PBDB identifier.
///
/// Accepts bare numbers as well as the prefixed `txn:`/`var:` forms of the
/// `com` vocabulary. Empty cells and `0` mean "no taxon".
pub fn parse_taxon_id(value: &str) -> Result<Option<TaxonId>> {
    let value = value.trim();
    let digits = match value.rsplit_once(':') {
        Some((_, digits)) => digits,
        None => value,
    };
    if digits.is_empty() {
        return Ok(None);
    }

    let id = digits
        .parse::<TaxonId>()
        .map_err(|e| PaleotaxError::Parse(format!("invalid taxon identifier '{}': {}", value, e)))?;
    Ok(if id == 0 { None } else { Some(id) })
}

fn parse_ma(value: &str) -> Result<Option<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|e| PaleotaxError::Parse(format!("invalid age '{}': {}", value, e)))
}

/// The full source table, read-only once loaded
#[derive(Debug, Clone, Default)]
pub struct OccurrenceTable {
    records: Vec<TaxonRecord>,
}

impl OccurrenceTable {
    pub fn from_records(records: Vec<TaxonRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, source: &SourceConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file, source)?;
        tracing::info!("Loaded {} taxon rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, source: &SourceConfig) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(source.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| PaleotaxError::MissingColumn(name.to_string()))
        };

        let cols = &source.columns;
        let accepted_no = column(&cols.accepted_no)?;
        let accepted_name = column(&cols.accepted_name)?;
        let accepted_rank = column(&cols.accepted_rank)?;
        let parent_no = column(&cols.parent_no)?;
        let firstapp_max_ma = column(&cols.firstapp_max_ma)?;
        let lastapp_min_ma = column(&cols.lastapp_min_ma)?;
        let is_extant = column(&cols.is_extant)?;
        let difference = column(&cols.difference)?;

        let mut records = Vec::new();
        for (i, row) in csv.records().enumerate() {
            let row = row?;
            // Header occupies line 1
            let line = i + 2;
            let cell = |pos: usize| row.get(pos).unwrap_or("");
            let at_line = |e: PaleotaxError| match e {
                PaleotaxError::Parse(msg) => PaleotaxError::Parse(format!("line {}: {}", line, msg)),
                other => other,
            };

            let id = parse_taxon_id(cell(accepted_no))
                .map_err(at_line)?
                .ok_or_else(|| PaleotaxError::Parse(format!("line {}: missing accepted identifier", line)))?;

            records.push(TaxonRecord {
                accepted_no: id,
                accepted_name: cell(accepted_name).trim().to_string(),
                accepted_rank: cell(accepted_rank).trim().to_string(),
                // Roots may list themselves as parent
                parent_no: parse_taxon_id(cell(parent_no))
                    .map_err(at_line)?
                    .filter(|parent| *parent != id),
                firstapp_max_ma: parse_ma(cell(firstapp_max_ma)).map_err(at_line)?,
                lastapp_min_ma: parse_ma(cell(lastapp_min_ma)).map_err(at_line)?,
                is_extant: cell(is_extant).trim() == EXTANT_FLAG,
                difference: cell(difference).trim().to_string(),
            });
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&TaxonRecord> {
        self.records.get(row)
    }

    pub fn records(&self) -> &[TaxonRecord] {
        &self.records
    }
}

/// Identifier to row-position index, built once per table.
///
/// Rows sharing an identifier are kept in table order so that
/// [`TaxonIndex::first`] is a stable tie-break.
#[derive(Debug, Clone, Default)]
pub struct TaxonIndex {
    positions: HashMap<TaxonId, Vec<usize>>,
}

impl TaxonIndex {
    pub fn build(table: &OccurrenceTable) -> Self {
        let mut positions: HashMap<TaxonId, Vec<usize>> = HashMap::with_capacity(table.len());
        for (row, record) in table.records().iter().enumerate() {
            positions.entry(record.accepted_no).or_default().push(row);
        }

        let duplicated = positions.values().filter(|rows| rows.len() > 1).count();
        if duplicated > 0 {
            tracing::debug!("{} identifiers appear on more than one row; first row wins", duplicated);
        }

        Self { positions }
    }

    /// First row, in table order, carrying `id`
    pub fn first(&self, id: TaxonId) -> Option<usize> {
        self.positions.get(&id).and_then(|rows| rows.first().copied())
    }

    /// Every row carrying `id`, in table order
    pub fn rows(&self, id: TaxonId) -> &[usize] {
        self.positions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Row positions of the genera and subgenera to resolve.
///
/// Keeps valid (empty difference) genus/subgenus rows that have both
/// occurrence ages, one row per accepted identifier, sorted by name and
/// then identifier.
pub fn candidates(table: &OccurrenceTable) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut missing_ages = 0usize;
    let mut rows = Vec::new();

    for (row, record) in table.records().iter().enumerate() {
        if !record.is_valid() {
            continue;
        }
        if !matches!(record.rank(), Some(TaxonomicRank::Genus | TaxonomicRank::Subgenus)) {
            continue;
        }
        if record.firstapp_max_ma.is_none() || record.lastapp_min_ma.is_none() {
            missing_ages += 1;
            continue;
        }
        if seen.insert(record.accepted_no) {
            rows.push(row);
        }
    }

    if missing_ages > 0 {
        tracing::info!("Skipped {} genus-level rows without occurrence ages", missing_ages);
    }

    rows.sort_by(|&a, &b| {
        let (a, b) = (&table.records[a], &table.records[b]);
        a.accepted_name
            .cmp(&b.accepted_name)
            .then(a.accepted_no.cmp(&b.accepted_no))
    });
    rows
}
