/// Common fixtures for paleotax integration tests
///
/// Builds small PBDB-style taxa tables, both as in-memory records and as
/// CSV text in the `vocab=pbdb` column layout.
use paleotax::bio::occurrence::{OccurrenceTable, TaxonRecord};
use paleotax::core::config::SourceConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A trimmed-down PBDB taxa export covering trilobites, a nautilus and a
/// cross-class homonym
#[allow(dead_code)]
pub const PBDB_TAXA_CSV: &str = "\
orig_no,taxon_no,record_type,taxon_rank,taxon_name,difference,accepted_no,accepted_rank,accepted_name,parent_no,is_extant,firstapp_max_ma,firstapp_min_ma,lastapp_max_ma,lastapp_min_ma
1,1,txn,kingdom,Animalia,,1,kingdom,Animalia,,extant,,,,
2,2,txn,phylum,Arthropoda,,2,phylum,Arthropoda,1,extant,,,,
3,3,txn,unranked clade,Artiopoda,,3,unranked clade,Artiopoda,2,,,,,
4,4,txn,class,Trilobita,,4,class,Trilobita,3,extinct,,,,
5,5,txn,order,Lichida,,5,order,Lichida,4,extinct,,,,
6,6,txn,family,Lichidae,,6,family,Lichidae,5,extinct,,,,
7,7,txn,genus,Acanthopyge,,7,genus,Acanthopyge,6,extinct,407.6,393.3,387.7,382.7
8,8,txn,subgenus,Acanthopyge (Acanthopyge),,8,subgenus,Acanthopyge (Acanthopyge),7,extinct,400,393.3,390,387.7
9,9,txn,subgenus,Acanthopyge (Lobopyge),,9,subgenus,Acanthopyge (Lobopyge),7,extinct,407.6,400,393.3,387.7
10,10,txn,phylum,Mollusca,,10,phylum,Mollusca,1,extant,,,,
11,11,txn,class,Cephalopoda,,11,class,Cephalopoda,10,extant,,,,
12,12,txn,genus,Nautilus,,12,genus,Nautilus,11,extant,40.4,33.9,5.333,2.58
13,13,txn,genus,Nautilites,subjective synonym of,12,genus,Nautilus,11,extinct,40.4,33.9,5.333,2.58
14,14,txn,class,Insecta,,14,class,Insecta,2,extant,,,,
15,15,txn,genus,Agnostus,,15,genus,Agnostus,4,extinct,501,497,494,485.4
16,16,txn,genus,Agnostus,,16,genus,Agnostus,14,extinct,130,125,113,100.5
17,17,txn,genus,Orphanella,,17,genus,Orphanella,999,extinct,20,15,10,5.3
18,18,txn,genus,Nomenclatura,,18,genus,Nomenclatura,4,extinct,,,,
";

#[allow(dead_code)]
pub fn pbdb_table() -> OccurrenceTable {
    OccurrenceTable::from_reader(PBDB_TAXA_CSV.as_bytes(), &SourceConfig::default())
        .expect("fixture table should parse")
}

/// A linear chain of `depth` scale ranks above a single genus.
///
/// Ranks are taken broadest-first; the genus sits on row `depth`.
#[allow(dead_code)]
pub fn linear_chain(ranks: &[&str], max_ma: f64, min_ma: f64, extant: bool) -> OccurrenceTable {
    let mut records = Vec::new();
    for (i, rank) in ranks.iter().enumerate() {
        let id = i as u32 + 1;
        let mut record = TaxonRecord::new(id, &format!("Taxon{}", id), rank);
        if i > 0 {
            record = record.with_parent(id - 1);
        }
        records.push(record);
    }

    let genus_id = ranks.len() as u32 + 1;
    let mut genus = TaxonRecord::new(genus_id, "Chainia", "genus").with_ages(max_ma, min_ma);
    if genus_id > 1 {
        genus = genus.with_parent(genus_id - 1);
    }
    if extant {
        genus = genus.extant();
    }
    records.push(genus);
    OccurrenceTable::from_records(records)
}

/// Test environment that manages a temporary working directory
#[allow(dead_code)]
pub struct TestEnvironment {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnvironment {
    pub fn new() -> Self {
        TestEnvironment {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get a path within the test environment
    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }
}
