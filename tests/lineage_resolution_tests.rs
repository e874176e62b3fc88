/// Lineage resolution over PBDB-style taxa tables
///
/// Covers the behaviours downstream users rely on:
/// - Deterministic, order-independent resolution
/// - Rank filtering along parent chains with gaps
/// - Subgenus name splitting and pull-of-the-recent ages
mod common;

use common::{linear_chain, pbdb_table};
use paleotax::bio::occurrence::{candidates, TaxonIndex};
use paleotax::bio::taxonomy::{Lineage, TaxonomicRank};
use paleotax::core::resolver::{resolve_lineage, LineageResolver, ResolveError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rstest::rstest;

fn sorted_by_genus(mut lineages: Vec<Lineage>) -> Vec<Lineage> {
    lineages.sort_by(|a, b| {
        a.genus()
            .cmp(b.genus())
            .then_with(|| a.subgenus().cmp(b.subgenus()))
            .then_with(|| a.class().cmp(b.class()))
    });
    lineages
}

#[test]
fn test_candidate_selection() {
    let table = pbdb_table();
    let rows = candidates(&table);

    let names: Vec<&str> = rows
        .iter()
        .map(|&r| table.get(r).unwrap().accepted_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Acanthopyge",
            "Acanthopyge (Acanthopyge)",
            "Acanthopyge (Lobopyge)",
            "Agnostus",
            "Agnostus",
            "Nautilus",
            "Orphanella",
        ]
    );
}

#[test]
fn test_full_lineage_of_trilobite() {
    let table = pbdb_table();
    let index = TaxonIndex::build(&table);
    let lineage = resolve_lineage(&table, &index, 6).unwrap();

    let expected = Lineage::new("Acanthopyge", 407.6, 382.7)
        .with(TaxonomicRank::Kingdom, "Animalia")
        .with(TaxonomicRank::Phylum, "Arthropoda")
        .with(TaxonomicRank::Class, "Trilobita")
        .with(TaxonomicRank::Order, "Lichida")
        .with(TaxonomicRank::Family, "Lichidae");
    assert_eq!(lineage, expected);
}

#[test]
fn test_subgenus_split() {
    let table = pbdb_table();
    let index = TaxonIndex::build(&table);
    let lineage = resolve_lineage(&table, &index, 8).unwrap();

    assert_eq!(lineage.genus(), "Acanthopyge");
    assert_eq!(lineage.subgenus(), "Lobopyge");
    assert_eq!(lineage.species, "sp.");
    assert_eq!(lineage.rank(TaxonomicRank::Family), "Lichidae");
}

#[test]
fn test_extant_genus_reaches_present() {
    let table = pbdb_table();
    let index = TaxonIndex::build(&table);
    let lineage = resolve_lineage(&table, &index, 11).unwrap();

    assert_eq!(lineage.genus(), "Nautilus");
    assert_eq!(lineage.min_ma, 0.0);
    assert_eq!(lineage.max_ma, 40.4);
    assert_eq!(lineage.class(), "Cephalopoda");
}

#[test]
fn test_broken_parent_link_is_partial_not_error() {
    let table = pbdb_table();
    let index = TaxonIndex::build(&table);
    let lineage = resolve_lineage(&table, &index, 16).unwrap();

    assert_eq!(lineage.genus(), "Orphanella");
    assert_eq!(lineage.populated_ranks(), 1);
}

#[test]
fn test_resolution_is_idempotent() {
    let table = pbdb_table();
    let resolver = LineageResolver::new(&table).with_silent(true);
    let rows = candidates(&table);

    for position in 0..rows.len() {
        let first = resolver.resolve_candidate(&rows, position).unwrap();
        let second = resolver.resolve_candidate(&rows, position).unwrap();
        assert_eq!(first.to_record(), second.to_record());
    }
}

#[test]
fn test_order_independence() {
    let table = pbdb_table();
    let resolver = LineageResolver::new(&table).with_silent(true);
    let forward = candidates(&table);

    let mut reversed = forward.clone();
    reversed.reverse();

    let mut shuffled = forward.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(42));

    let expected = sorted_by_genus(resolver.resolve_all(&forward).lineages);
    assert_eq!(sorted_by_genus(resolver.resolve_all(&reversed).lineages), expected);
    assert_eq!(sorted_by_genus(resolver.resolve_all(&shuffled).lineages), expected);
}

#[test]
fn test_failed_candidate_leaves_hole() {
    let mut records = pbdb_table().records().to_vec();
    records.push(
        paleotax::TaxonRecord::new(40, "Acanthopyge Lobopyge Extra", "subgenus")
            .with_parent(7)
            .with_ages(400.0, 390.0),
    );
    let table = paleotax::OccurrenceTable::from_records(records);
    let rows = candidates(&table);
    let batch = LineageResolver::new(&table).with_silent(true).resolve_all(&rows);

    assert_eq!(batch.lineages.len(), rows.len() - 1);
    assert_eq!(batch.failure_count(), 1);
    assert!(matches!(
        batch.failures[0].error,
        ResolveError::MalformedCompoundName { id: 40, .. }
    ));
}

#[rstest]
#[case(&["kingdom", "phylum", "class", "order", "family"], 5)]
#[case(&["kingdom", "unranked clade", "phylum", "informal", "class"], 3)]
#[case(&["superclass", "class", "subclass", "infraclass", "superorder", "order"], 6)]
#[case(&["unranked clade", "unranked clade"], 0)]
#[case(&[], 0)]
fn test_chain_populates_only_scale_ranks(#[case] ranks: &[&str], #[case] expected: usize) {
    let table = linear_chain(ranks, 100.0, 90.0, false);
    let index = TaxonIndex::build(&table);
    let lineage = resolve_lineage(&table, &index, ranks.len()).unwrap();

    // The genus slot is always filled by the target itself
    assert_eq!(lineage.populated_ranks(), expected + 1);
}

proptest! {
    #[test]
    fn prop_age_range_is_ordered(
        min_ma in 0.0f64..500.0,
        span in 0.0f64..100.0,
        extant in any::<bool>(),
        depth in 0usize..8,
    ) {
        let ranks = ["kingdom", "phylum", "class", "order", "suborder", "family", "subfamily", "tribe"];
        let table = linear_chain(&ranks[..depth], min_ma + span, min_ma, extant);
        let index = TaxonIndex::build(&table);
        let lineage = resolve_lineage(&table, &index, depth).unwrap();

        prop_assert!(lineage.max_ma >= lineage.min_ma);
        prop_assert!(lineage.min_ma >= 0.0);
        if extant {
            prop_assert_eq!(lineage.min_ma, 0.0);
        } else {
            prop_assert_eq!(lineage.min_ma, min_ma);
        }
        prop_assert_eq!(lineage.populated_ranks(), depth + 1);
    }
}
