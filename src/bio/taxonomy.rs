/// Taxonomic rank scale and the reconstructed lineage record
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fixed rank levels a lineage carries
pub const SCALE_LEN: usize = 21;

/// Rank levels above genus (Superkingdom through Subtribe)
pub const HIGHER_LEN: usize = 19;

/// Placeholder written to the Species column of every lineage
pub const SPECIES_PLACEHOLDER: &str = "sp.";

/// The fixed taxonomic scale, from the broadest level to subgenus.
///
/// Declaration order is the output column order and doubles as the slot
/// index into [`Lineage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxonomicRank {
    Superkingdom,
    Kingdom,
    Subkingdom,
    Superphylum,
    Phylum,
    Subphylum,
    Superclass,
    Class,
    Subclass,
    Infraclass,
    Superorder,
    Order,
    Suborder,
    Infraorder,
    Superfamily,
    Family,
    Subfamily,
    Tribe,
    Subtribe,
    Genus,
    Subgenus,
}

impl TaxonomicRank {
    /// All 21 levels in column order
    pub const SCALE: &'static [TaxonomicRank] = &[
        Self::Superkingdom,
        Self::Kingdom,
        Self::Subkingdom,
        Self::Superphylum,
        Self::Phylum,
        Self::Subphylum,
        Self::Superclass,
        Self::Class,
        Self::Subclass,
        Self::Infraclass,
        Self::Superorder,
        Self::Order,
        Self::Suborder,
        Self::Infraorder,
        Self::Superfamily,
        Self::Family,
        Self::Subfamily,
        Self::Tribe,
        Self::Subtribe,
        Self::Genus,
        Self::Subgenus,
    ];

    /// The 19 levels compared when auditing duplicate genera
    pub const HIGHER: &'static [TaxonomicRank] = Self::SCALE.split_at(HIGHER_LEN).0;

    /// Parse a rank as written in a PBDB `accepted_rank` column.
    ///
    /// Ranks outside the fixed scale (species, unranked clade, informal, ...)
    /// return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let rank = match s.trim().to_lowercase().as_str() {
            "superkingdom" => Self::Superkingdom,
            "kingdom" => Self::Kingdom,
            "subkingdom" => Self::Subkingdom,
            "superphylum" => Self::Superphylum,
            "phylum" => Self::Phylum,
            "subphylum" => Self::Subphylum,
            "superclass" => Self::Superclass,
            "class" => Self::Class,
            "subclass" => Self::Subclass,
            "infraclass" => Self::Infraclass,
            "superorder" => Self::Superorder,
            "order" => Self::Order,
            "suborder" => Self::Suborder,
            "infraorder" => Self::Infraorder,
            "superfamily" => Self::Superfamily,
            "family" => Self::Family,
            "subfamily" => Self::Subfamily,
            "tribe" => Self::Tribe,
            "subtribe" => Self::Subtribe,
            "genus" => Self::Genus,
            "subgenus" => Self::Subgenus,
            _ => return None,
        };
        Some(rank)
    }

    /// Slot position within a lineage
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Superkingdom => "Superkingdom",
            Self::Kingdom => "Kingdom",
            Self::Subkingdom => "Subkingdom",
            Self::Superphylum => "Superphylum",
            Self::Phylum => "Phylum",
            Self::Subphylum => "Subphylum",
            Self::Superclass => "Superclass",
            Self::Class => "Class",
            Self::Subclass => "Subclass",
            Self::Infraclass => "Infraclass",
            Self::Superorder => "Superorder",
            Self::Order => "Order",
            Self::Suborder => "Suborder",
            Self::Infraorder => "Infraorder",
            Self::Superfamily => "Superfamily",
            Self::Family => "Family",
            Self::Subfamily => "Subfamily",
            Self::Tribe => "Tribe",
            Self::Subtribe => "Subtribe",
            Self::Genus => "Genus",
            Self::Subgenus => "Subgenus",
        }
    }
}

impl fmt::Display for TaxonomicRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One reconstructed genus or subgenus with its higher taxonomy and age range.
///
/// Empty rank slots mean the lineage walk never met that level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    ranks: [String; SCALE_LEN],
    pub species: String,
    pub max_ma: f64,
    pub min_ma: f64,
}

impl Lineage {
    /// Column headers of the lineage table, in output order
    pub const COLUMNS: [&'static str; SCALE_LEN + 3] = [
        "Superkingdom",
        "Kingdom",
        "Subkingdom",
        "Superphylum",
        "Phylum",
        "Subphylum",
        "Superclass",
        "Class",
        "Subclass",
        "Infraclass",
        "Superorder",
        "Order",
        "Suborder",
        "Infraorder",
        "Superfamily",
        "Family",
        "Subfamily",
        "Tribe",
        "Subtribe",
        "Genus",
        "Subgenus",
        "Species",
        "max_ma",
        "min_ma",
    ];

    pub fn new(genus: impl Into<String>, max_ma: f64, min_ma: f64) -> Self {
        let mut lineage = Self {
            ranks: Default::default(),
            species: SPECIES_PLACEHOLDER.to_string(),
            max_ma,
            min_ma,
        };
        lineage.set(TaxonomicRank::Genus, genus);
        lineage
    }

    pub fn rank(&self, rank: TaxonomicRank) -> &str {
        &self.ranks[rank.index()]
    }

    pub fn set(&mut self, rank: TaxonomicRank, name: impl Into<String>) {
        self.ranks[rank.index()] = name.into();
    }

    /// Record `name` at `rank` unless the slot is already filled.
    ///
    /// Returns whether the slot was written.
    pub fn set_if_empty(&mut self, rank: TaxonomicRank, name: &str) -> bool {
        let slot = &mut self.ranks[rank.index()];
        if slot.is_empty() {
            *slot = name.to_string();
            true
        } else {
            false
        }
    }

    /// Builder-style setter, mostly for assembling fixtures
    pub fn with(mut self, rank: TaxonomicRank, name: impl Into<String>) -> Self {
        self.set(rank, name);
        self
    }

    pub fn genus(&self) -> &str {
        self.rank(TaxonomicRank::Genus)
    }

    pub fn subgenus(&self) -> &str {
        self.rank(TaxonomicRank::Subgenus)
    }

    pub fn class(&self) -> &str {
        self.rank(TaxonomicRank::Class)
    }

    /// Number of populated rank slots
    pub fn populated_ranks(&self) -> usize {
        self.ranks.iter().filter(|name| !name.is_empty()).count()
    }

    /// Row values in [`Lineage::COLUMNS`] order
    pub fn to_record(&self) -> Vec<String> {
        let mut record: Vec<String> = self.ranks.to_vec();
        record.push(self.species.clone());
        record.push(format_age(self.max_ma));
        record.push(format_age(self.min_ma));
        record
    }

    /// Rebuild a lineage from values in [`Lineage::COLUMNS`] order
    pub fn from_record(fields: &[&str]) -> crate::Result<Self> {
        if fields.len() != Self::COLUMNS.len() {
            return Err(crate::PaleotaxError::Parse(format!(
                "expected {} lineage fields, found {}",
                Self::COLUMNS.len(),
                fields.len()
            )));
        }

        let mut lineage = Self::new("", parse_age(fields[SCALE_LEN + 1])?, parse_age(fields[SCALE_LEN + 2])?);
        for (rank, value) in TaxonomicRank::SCALE.iter().zip(fields) {
            lineage.set(*rank, *value);
        }
        lineage.species = fields[SCALE_LEN].to_string();
        Ok(lineage)
    }
}

fn format_age(age: f64) -> String {
    // -0 compares equal to 0 but would print with its sign
    format!("{}", age + 0.0)
}

fn parse_age(value: &str) -> crate::Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| crate::PaleotaxError::Parse(format!("invalid age '{}': {}", value, e)))
}
