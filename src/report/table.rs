/// Delimited lineage table: the persisted output of resolution and the
/// input of a standalone audit
use crate::bio::taxonomy::Lineage;
use crate::{PaleotaxError, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

pub fn write_lineages<W: Write>(writer: W, lineages: &[Lineage], delimiter: u8) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(Lineage::COLUMNS)?;
    for lineage in lineages {
        csv.write_record(lineage.to_record())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_lineages_to_path<P: AsRef<Path>>(path: P, lineages: &[Lineage], delimiter: u8) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_lineages(BufWriter::new(file), lineages, delimiter)?;
    tracing::info!("Wrote {} lineages to {}", lineages.len(), path.as_ref().display());
    Ok(())
}

/// Read a lineage table back.
///
/// Every lineage column must be present in the header, in any order;
/// extra columns are ignored.
pub fn read_lineages<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Lineage>> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let positions = Lineage::COLUMNS
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| PaleotaxError::MissingColumn(column.to_string()))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut lineages = Vec::new();
    for (i, row) in csv.records().enumerate() {
        let row = row?;
        let fields: Vec<&str> = positions.iter().map(|&p| row.get(p).unwrap_or("")).collect();
        let lineage = Lineage::from_record(&fields).map_err(|e| match e {
            PaleotaxError::Parse(msg) => PaleotaxError::Parse(format!("line {}: {}", i + 2, msg)),
            other => other,
        })?;
        lineages.push(lineage);
    }

    Ok(lineages)
}

pub fn read_lineages_from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Vec<Lineage>> {
    let file = File::open(path.as_ref())?;
    let lineages = read_lineages(file, delimiter)?;
    tracing::info!("Read {} lineages from {}", lineages.len(), path.as_ref().display());
    Ok(lineages)
}
