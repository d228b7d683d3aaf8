//! Property-based tests for group dereferencing.
//!
//! These tests use proptest to generate acyclic group graphs and verify that
//! flattening behaves like a straightforward recursive expansion.

#[cfg(test)]
mod proptest_tests {
    use crate::dereference::dereference_groups;
    use crate::manifest::Group;
    use crate::options::DereferenceOptions;
    use proptest::prelude::*;

    /// Build groups `g0..gN` whose references only point at lower indices,
    /// so the graph is acyclic and nests at most N levels deep.
    fn build_groups(raw: &[Vec<usize>]) -> Vec<Group> {
        raw.iter()
            .enumerate()
            .map(|(i, entries)| {
                let templates: Vec<String> = entries
                    .iter()
                    .map(|&v| {
                        if i == 0 || v < 5 {
                            format!("t{}", v)
                        } else {
                            format!("group:g{}", v % i)
                        }
                    })
                    .collect();
                Group::new(format!("g{}", i), templates)
            })
            .collect()
    }

    fn expand(groups: &[Group], index: usize) -> Vec<String> {
        let mut out = Vec::new();
        for entry in &groups[index].templates {
            match entry.strip_prefix("group:") {
                Some(name) => {
                    let target = groups.iter().position(|g| g.name == name).unwrap();
                    out.extend(expand(groups, target));
                }
                None => out.push(entry.clone()),
            }
        }
        out
    }

    fn raw_groups() -> impl Strategy<Value = Vec<Vec<usize>>> {
        prop::collection::vec(prop::collection::vec(0usize..10, 0..4), 1..6)
    }

    proptest! {
        /// Property: no group reference markers survive dereferencing
        #[test]
        fn no_markers_remain(raw in raw_groups()) {
            let groups = build_groups(&raw);
            let out = dereference_groups(&groups, &DereferenceOptions::default()).unwrap();
            for group in &out {
                prop_assert!(group.templates.iter().all(|t| !t.starts_with("group:")));
            }
        }

        /// Property: group names and order are preserved
        #[test]
        fn names_and_order_preserved(raw in raw_groups()) {
            let groups = build_groups(&raw);
            let out = dereference_groups(&groups, &DereferenceOptions::default()).unwrap();
            let before: Vec<&String> = groups.iter().map(|g| &g.name).collect();
            let after: Vec<&String> = out.iter().map(|g| &g.name).collect();
            prop_assert_eq!(before, after);
        }

        /// Property: the result equals a naive recursive expansion
        #[test]
        fn matches_recursive_expansion(raw in raw_groups()) {
            let groups = build_groups(&raw);
            let out = dereference_groups(&groups, &DereferenceOptions::default()).unwrap();
            for (index, group) in out.iter().enumerate() {
                prop_assert_eq!(&group.templates, &expand(&groups, index));
            }
        }

        /// Property: dereferencing is idempotent
        #[test]
        fn dereferencing_is_idempotent(raw in raw_groups()) {
            let groups = build_groups(&raw);
            let once = dereference_groups(&groups, &DereferenceOptions::default()).unwrap();
            let twice = dereference_groups(&once, &DereferenceOptions::default()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: strict mode accepts every acyclic graph
        #[test]
        fn strict_mode_accepts_acyclic_graphs(raw in raw_groups()) {
            let groups = build_groups(&raw);
            let lenient = dereference_groups(&groups, &DereferenceOptions::default()).unwrap();
            let strict = dereference_groups(&groups, &DereferenceOptions::strict()).unwrap();
            prop_assert_eq!(lenient, strict);
        }
    }
}
