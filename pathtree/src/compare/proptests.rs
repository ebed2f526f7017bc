//! Property-based tests for parsing, comparison and hashing.

use super::{CompareFlags, FileComparison};
use crate::{FileName, Interpretation, PathTree};
use proptest::prelude::*;

fn component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_-]{1,8}",
        Just("..".to_string()),
        "[aAbB]{1,2}",
    ]
}

fn portable_path_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("C:"), Just("c:"), Just("\\\\host")],
        any::<bool>(),
        prop::collection::vec(component_strategy(), 0..6),
    )
        .prop_map(|(fs, absolute, parts)| {
            let mut path = fs.to_string();
            if absolute || fs.starts_with('\\') {
                path.push('/');
            }
            path.push_str(&parts.join("/"));
            if path.is_empty() {
                path.push('.');
            }
            path
        })
}

/// Strings already in canonical portable form: a root, then non-empty
/// names free of separators and `.`/`..`.
fn canonical_path_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("/"), Just("C:"), Just("c:/"), Just("\\\\host/")],
        prop::collection::vec("[a-zA-Z0-9_-]{1,8}(\\.[a-z]{1,3})?", 0..6),
    )
        .prop_map(|(root, names)| {
            let path = format!("{root}{}", names.join("/"));
            if path.is_empty() {
                ".".to_string()
            } else {
                path
            }
        })
}

fn flag_sets() -> [CompareFlags; 4] {
    [
        CompareFlags::empty(),
        CompareFlags::CASE_INSENSITIVE,
        CompareFlags::FINAL_FIRST,
        CompareFlags::CASE_INSENSITIVE | CompareFlags::FINAL_FIRST,
    ]
}

fn parse(tree: &PathTree, s: &str) -> FileName {
    tree.parse(s, Interpretation::Portable)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Canonical portable strings print back unchanged
    #[test]
    fn portable_round_trip(path in canonical_path_strategy()) {
        let tree = PathTree::new();
        let name = parse(&tree, &path);
        prop_assert_eq!(name.to_string(), path);

        let windows = name.to_string_style(Interpretation::Windows);
        prop_assert_eq!(tree.parse(&windows, Interpretation::Windows), name);
    }

    // Any portable input reaches a fixed point after one parse/print cycle
    #[test]
    fn rendering_is_stable(path in portable_path_strategy()) {
        let tree = PathTree::new();
        let rendered = parse(&tree, &path).to_string();
        prop_assert_eq!(parse(&tree, &rendered).to_string(), rendered);
    }

    // Repeated separators and "." components collapse
    #[test]
    fn separators_collapse(parts in prop::collection::vec("[a-z]{1,5}", 1..6)) {
        let tree = PathTree::new();
        let messy = format!("//{}//./", parts.join("//./"));
        let clean = format!("/{}", parts.join("/"));
        prop_assert_eq!(parse(&tree, &messy).to_string(), clean);
    }

    // Every path compares Equal to itself under every flag set
    #[test]
    fn compare_is_reflexive(path in portable_path_strategy()) {
        let tree = PathTree::new();
        let name = parse(&tree, &path);
        for flags in flag_sets() {
            prop_assert_eq!(name.compare(&name, flags), FileComparison::Equal);
        }
    }

    // Swapping the arguments negates the result
    #[test]
    fn compare_is_antisymmetric(a in portable_path_strategy(), b in portable_path_strategy()) {
        let tree = PathTree::new();
        let (fa, fb) = (parse(&tree, &a), parse(&tree, &b));
        for flags in flag_sets() {
            prop_assert_eq!(fa.compare(&fb, flags), -fb.compare(&fa, flags));
        }
    }

    // The ordering is transitive for each flag set
    #[test]
    fn compare_is_transitive(
        a in portable_path_strategy(),
        b in portable_path_strategy(),
        c in portable_path_strategy(),
    ) {
        let tree = PathTree::new();
        let mut names = [parse(&tree, &a), parse(&tree, &b), parse(&tree, &c)];
        for flags in flag_sets() {
            names.sort_by(|x, y| x.compare(y, flags).to_ordering());
            prop_assert!(names[0].compare(&names[1], flags).to_ordering().is_le());
            prop_assert!(names[1].compare(&names[2], flags).to_ordering().is_le());
            prop_assert!(names[0].compare(&names[2], flags).to_ordering().is_le());
        }
    }

    // Case-sensitive equality is node identity
    #[test]
    fn equal_means_identical(a in portable_path_strategy(), b in portable_path_strategy()) {
        let tree = PathTree::new();
        let (fa, fb) = (parse(&tree, &a), parse(&tree, &b));
        let equal = fa.compare(&fb, CompareFlags::empty()) == FileComparison::Equal;
        prop_assert_eq!(equal, fa == fb);
    }

    // Equal paths hash equally under the same flags
    #[test]
    fn hash_agrees_with_compare(a in portable_path_strategy(), b in portable_path_strategy()) {
        let tree = PathTree::new();
        let (fa, fb) = (parse(&tree, &a), parse(&tree, &b));
        for flags in flag_sets() {
            if fa.compare(&fb, flags) == FileComparison::Equal {
                prop_assert_eq!(fa.compute_hash(flags), fb.compute_hash(flags));
            }
        }
    }

    // Comparing against text gives the same answer as comparing handles
    #[test]
    fn compare_str_matches_compare(a in portable_path_strategy(), b in portable_path_strategy()) {
        let tree = PathTree::new();
        let fa = parse(&tree, &a);
        for flags in [CompareFlags::empty(), CompareFlags::CASE_INSENSITIVE] {
            let expected = fa.compare(&parse(&tree, &b), flags);
            prop_assert_eq!(fa.compare_str(&b, Interpretation::Portable, flags), expected);
        }
    }

    // Prefix relations agree with the common prefix count
    #[test]
    fn common_prefix_consistent(a in portable_path_strategy(), b in portable_path_strategy()) {
        let tree = PathTree::new();
        let (fa, fb) = (parse(&tree, &a), parse(&tree, &b));
        let flags = CompareFlags::empty();
        let prefix = fa.common_prefix_num_names(&fb, flags);
        match fa.compare(&fb, flags) {
            FileComparison::IsParentOf | FileComparison::Equal => {
                prop_assert_eq!(prefix, i32::try_from(fa.num_names()).unwrap());
            }
            FileComparison::IsChildOf => {
                prop_assert_eq!(prefix, i32::try_from(fb.num_names()).unwrap());
            }
            _ => {
                prop_assert!(prefix < i32::try_from(fa.num_names().min(fb.num_names())).unwrap() + 1);
            }
        }
    }

    // Dropping every handle returns the tree to the bare super-root
    #[test]
    fn refcounts_are_conserved(paths in prop::collection::vec(portable_path_strategy(), 0..20)) {
        let tree = PathTree::new();
        {
            let names: Vec<FileName> = paths.iter().map(|p| parse(&tree, p)).collect();
            let parents: Vec<Option<FileName>> = names.iter().map(FileName::parent).collect();
            prop_assert!(tree.stats().is_ok());
            drop(parents);
        }
        prop_assert_eq!(tree.live_nodes(), 1);
    }
}
