pub mod occurrence;
pub mod taxonomy;

pub use occurrence::{OccurrenceTable, TaxonId, TaxonIndex, TaxonRecord};
pub use taxonomy::{Lineage, TaxonomicRank};
