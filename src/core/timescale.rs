/// Geologic time scale intervals and their midpoint ages
use crate::core::config::TimescaleConfig;
use crate::{PaleotaxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Nested granularity of a chronostratigraphic interval, broadest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalLevel {
    Eon,
    Era,
    Period,
    Epoch,
    Age,
}

impl IntervalLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eon => "eon",
            Self::Era => "era",
            Self::Period => "period",
            Self::Epoch => "epoch",
            Self::Age => "age",
        }
    }
}

impl FromStr for IntervalLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eon" => Ok(Self::Eon),
            "era" => Ok(Self::Era),
            "period" => Ok(Self::Period),
            "epoch" | "series" => Ok(Self::Epoch),
            "age" | "stage" => Ok(Self::Age),
            _ => Err(format!("Unknown interval level: {}", s)),
        }
    }
}

impl fmt::Display for IntervalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub name: String,
    /// `None` for interval types outside the five levels (e.g. sub-ages)
    pub level: Option<IntervalLevel>,
    /// Older bound, Ma
    pub b_age: f64,
    /// Younger bound, Ma
    pub t_age: f64,
}

impl Interval {
    pub fn midpoint(&self) -> f64 {
        (self.b_age + self.t_age) / 2.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntervalTable {
    intervals: Vec<Interval>,
}

impl IntervalTable {
    pub fn from_reader<R: Read>(reader: R, config: &TimescaleConfig) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
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
        let name_col = column(&config.name_column)?;
        let level_col = column(&config.level_column)?;
        let b_col = column(&config.base_age_column)?;
        let t_col = column(&config.top_age_column)?;

        let mut intervals = Vec::new();
        for (i, row) in csv.records().enumerate() {
            let row = row?;
            let cell = |pos: usize| row.get(pos).unwrap_or("").trim();
            let age = |pos: usize| -> Result<f64> {
                cell(pos).parse::<f64>().map_err(|e| {
                    PaleotaxError::Parse(format!("line {}: invalid age '{}': {}", i + 2, cell(pos), e))
                })
            };

            intervals.push(Interval {
                name: cell(name_col).to_string(),
                level: cell(level_col).parse().ok(),
                b_age: age(b_col)?,
                t_age: age(t_col)?,
            });
        }

        tracing::debug!("Read {} time scale intervals", intervals.len());
        Ok(Self { intervals })
    }

    pub fn find(&self, name: &str) -> Option<&Interval> {
        self.intervals.iter().find(|interval| interval.name == name)
    }

    /// Intervals at one level, optionally followed by one extra interval
    /// looked up by name (e.g. a Holocene appended to a list of periods).
    pub fn select(&self, level: IntervalLevel, extra: Option<&str>) -> Result<Vec<Interval>> {
        let mut selected: Vec<Interval> = self
            .intervals
            .iter()
            .filter(|interval| interval.level == Some(level))
            .cloned()
            .collect();

        if let Some(name) = extra {
            let interval = self
                .find(name)
                .ok_or_else(|| PaleotaxError::NotFound(format!("interval '{}'", name)))?;
            if !selected.iter().any(|s| s.name == interval.name) {
                selected.push(interval.clone());
            }
        }

        Ok(selected)
    }
}

/// Write intervals with their midpoint age as CSV
pub fn write_midpoints<W: Write>(writer: W, intervals: &[Interval]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(["name", "int_type", "b_age", "t_age", "mid_ma"])?;
    for interval in intervals {
        let level = interval.level.map(|l| l.as_str()).unwrap_or("");
        csv.write_record([
            interval.name.clone(),
            level.to_string(),
            interval.b_age.to_string(),
            interval.t_age.to_string(),
            interval.midpoint().to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
