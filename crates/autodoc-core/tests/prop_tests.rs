//! Property-based tests for tables, type expressions and model discovery

use autodoc_core::{
    parse_type, render_table, DocAssembler, EndpointDescriptor, FieldDesc, Locale, MapKind,
    ModelCatalog, Scalar, Sections, StructDesc, Ty, Walker, Wrapper,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Strategy for table cells without pipes or newlines
fn cell_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _<>,]{0,12}"
}

/// Strategy for type expressions built from scalars, wrappers and model names
fn ty_strategy() -> impl Strategy<Value = Ty> {
    let leaf = prop_oneof![
        proptest::sample::select(Scalar::ALL.to_vec()).prop_map(Ty::Scalar),
        "M[a-z]{0,6}".prop_map(Ty::named),
    ];

    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (proptest::sample::select(Wrapper::ALL.to_vec()), inner.clone())
                .prop_map(|(w, t)| Ty::wrapped(w, t)),
            (inner.clone(), 0usize..64).prop_map(|(t, n)| Ty::array(t, n)),
            (
                prop_oneof![Just(MapKind::HashMap), Just(MapKind::BTreeMap)],
                inner.clone(),
                inner
            )
                .prop_map(|(k, key, value)| Ty::map(k, key, value)),
        ]
    })
}

/// A catalog of `n` models where model `i` references the models in `edges[i]`
fn graph_catalog(n: usize, edges: &[Vec<usize>]) -> ModelCatalog {
    let mut catalog = ModelCatalog::new();
    for i in 0..n {
        let mut desc = StructDesc::named("g", format!("M{}", i))
            .field(FieldDesc::new("id", Ty::Scalar(Scalar::U32)).json("id"));
        for (j, target) in edges[i].iter().enumerate() {
            desc = desc.field(
                FieldDesc::new(
                    format!("f{}", j),
                    Ty::wrapped(Wrapper::Vec, Ty::named(format!("M{}", target % n))),
                )
                .json(format!("f{}", j)),
            );
        }
        catalog.insert(desc).unwrap();
    }
    catalog
}

fn reachable(n: usize, edges: &[Vec<usize>]) -> BTreeSet<usize> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![0];
    while let Some(i) = stack.pop() {
        if seen.insert(i) {
            stack.extend(edges[i].iter().map(|t| t % n));
        }
    }
    seen
}

proptest! {
    #[test]
    fn prop_table_rows_are_padded(
        header in proptest::collection::vec(cell_strategy(), 0..4),
        rows in proptest::collection::vec(proptest::collection::vec(cell_strategy(), 0..6), 0..6),
    ) {
        let table = render_table(&header, &rows);
        let columns = rows.iter().map(Vec::len).fold(header.len(), usize::max);

        let lines: Vec<&str> = table.lines().collect();
        prop_assert_eq!(lines.len(), rows.len() + 2);
        for line in lines {
            prop_assert_eq!(line.matches('|').count(), columns + 1);
        }
    }

    #[test]
    fn prop_labels_parse_back(ty in ty_strategy()) {
        let label = ty.label();
        let parsed = parse_type(&label);
        prop_assert!(parsed.is_ok(), "label `{}` did not parse", label);
        prop_assert_eq!(parsed.unwrap().label(), label);
    }

    #[test]
    fn prop_walk_records_each_reachable_model_once(
        (n, edges) in (1usize..8).prop_flat_map(|n| {
            (Just(n), proptest::collection::vec(proptest::collection::vec(0usize..8, 0..4), n))
        })
    ) {
        let catalog = graph_catalog(n, &edges);
        let records = Walker::new(Locale::English)
            .with_catalog(&catalog)
            .walk(&Ty::named("M0"));

        prop_assert_eq!(records.len(), reachable(n, &edges).len());

        let identities: HashSet<&str> = records.iter().map(|r| r.identity.as_str()).collect();
        prop_assert_eq!(identities.len(), records.len());
        prop_assert_eq!(records[0].identity.as_str(), "g::M0");
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(record.sequence_index, i);
        }
    }

    #[test]
    fn prop_endpoints_print_in_descending_order(
        indexes in proptest::collection::vec(-50i64..50, 1..10)
    ) {
        let endpoints: Vec<EndpointDescriptor> = indexes
            .iter()
            .enumerate()
            .map(|(i, idx)| EndpointDescriptor::new(*idx, format!("E{}-{}", idx, i), "s", "POST", "/e"))
            .collect();
        let doc = DocAssembler::new(Locale::English).assemble("T", &Sections::new(), &endpoints);

        let printed: Vec<i64> = doc
            .lines()
            .filter_map(|l| l.strip_prefix("### E"))
            .filter_map(|rest| rest.rsplit_once('-'))
            .filter_map(|(idx, _)| idx.parse().ok())
            .collect();
        let mut expected = indexes.clone();
        expected.sort_by(|a, b| b.cmp(a));
        prop_assert_eq!(printed, expected);
    }
}
