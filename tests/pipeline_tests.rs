/// End-to-end: taxa export on disk -> lineage table -> audit report
mod common;

use common::{TestEnvironment, PBDB_TAXA_CSV};
use paleotax::bio::occurrence::{candidates, OccurrenceTable};
use paleotax::core::auditor::{audit, AuditOptions};
use paleotax::core::config::{load_config, save_config, Config};
use paleotax::core::resolver::LineageResolver;
use paleotax::core::timescale::{write_midpoints, IntervalLevel, IntervalTable};
use paleotax::report::table::{read_lineages_from_path, write_lineages_to_path};
use paleotax::report::{generate, ReportFormat};
use pretty_assertions::assert_eq;

#[test]
fn test_file_pipeline() {
    let env = TestEnvironment::new();
    let input = env.write("taxa.csv", PBDB_TAXA_CSV);
    let config = Config::default();

    let table = OccurrenceTable::from_path(&input, &config.source).unwrap();
    let batch = LineageResolver::new(&table)
        .with_silent(true)
        .resolve_all(&candidates(&table));

    let lineages_path = env.path("lineages.csv");
    write_lineages_to_path(&lineages_path, &batch.lineages, config.output.delimiter_byte().unwrap()).unwrap();

    let contents = std::fs::read_to_string(&lineages_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Superkingdom,Kingdom,Subkingdom,Superphylum,Phylum,Subphylum,Superclass,Class,Subclass,\
         Infraclass,Superorder,Order,Suborder,Infraorder,Superfamily,Family,Subfamily,Tribe,\
         Subtribe,Genus,Subgenus,Species,max_ma,min_ma"
    );
    assert_eq!(lines.count(), 7);
    assert!(contents.contains(",Nautilus,,sp.,40.4,0\n"));

    let lineages = read_lineages_from_path(&lineages_path, b',').unwrap();
    assert_eq!(lineages, batch.lineages);

    let report = audit(&lineages, &AuditOptions::default());
    let text = generate(&report, ReportFormat::Text).unwrap();
    assert!(text.starts_with("71.43% "));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_custom_columns_from_config() {
    let env = TestEnvironment::new();
    let renamed = PBDB_TAXA_CSV
        .replacen("accepted_no", "acc_no", 1)
        .replace(',', "\t");
    let input = env.write("taxa.tsv", &renamed);

    let mut config = Config::default();
    config.source.delimiter = '\t';
    config.source.columns.accepted_no = "acc_no".to_string();
    let config_path = env.path("config.toml");
    save_config(&config_path, &config).unwrap();

    let config = load_config(&config_path).unwrap();
    let table = OccurrenceTable::from_path(&input, &config.source).unwrap();
    assert_eq!(table.len(), 18);
    assert_eq!(candidates(&table).len(), 7);
}

#[test]
fn test_interval_midpoints_from_file() {
    let env = TestEnvironment::new();
    let input = env.write(
        "intervals.csv",
        "int_id,name,abbrev,t_age,b_age,int_type\n\
         1,Cambrian,Cm,485.4,538.8,period\n\
         2,Ordovician,O,443.8,485.4,period\n\
         3,Holocene,H,0,0.0117,epoch\n",
    );
    let config = Config::default();

    let table = IntervalTable::from_reader(std::fs::File::open(&input).unwrap(), &config.timescale).unwrap();
    let periods = table.select(IntervalLevel::Period, Some("Holocene")).unwrap();

    let mut out = Vec::new();
    write_midpoints(&mut out, &periods).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Cambrian,period,538.8,485.4,"));
    let mid: f64 = lines[1].rsplit(',').next().unwrap().parse().unwrap();
    assert!((mid - 512.1).abs() < 1e-9);
    assert!(lines[3].starts_with("Holocene,epoch,0.0117,0,"));
}
