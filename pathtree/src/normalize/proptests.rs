//! Property-based tests for normalization.

use std::rc::Rc;

use super::{NormalizeFlags, Normalizer};
use crate::fs::MemoryFileSystem;
use crate::{Encoding, Interpretation, PathTree};
use proptest::prelude::*;

fn component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-cA-C]{1,3}",
        1 => Just("..".to_string()),
        1 => Just(".".to_string()),
        1 => Just("lnk".to_string()),
    ]
}

fn path_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("C:"), Just("c:")],
        any::<bool>(),
        prop::collection::vec(component_strategy(), 0..8),
    )
        .prop_map(|(fs, absolute, parts)| {
            let mut path = fs.to_string();
            if absolute {
                path.push('/');
            }
            path.push_str(&parts.join("/"));
            path
        })
}

fn flags_strategy() -> impl Strategy<Value = NormalizeFlags> {
    prop_oneof![
        Just(NormalizeFlags::empty()),
        Just(NormalizeFlags::LOWERCASE_ALWAYS),
        Just(NormalizeFlags::RESOLVE_SYMLINKS),
        Just(NormalizeFlags::NORMALIZE_CASE),
        Just(NormalizeFlags::RESOLVE_SYMLINKS | NormalizeFlags::LOWERCASE_ALWAYS),
    ]
}

fn fixture() -> (PathTree, Normalizer) {
    let tree = PathTree::new();
    let fs = Rc::new(MemoryFileSystem::new());
    fs.set_current_dir("C:/Work");
    fs.add_dir("C:/A/b");
    fs.add_dir("/a/B");
    fs.add_symlink("C:/Work/lnk", "../A");
    fs.add_symlink("/a/lnk", "B");
    let normalizer = Normalizer::new(tree.clone(), Box::new(fs));
    (tree, normalizer)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Normalizing a normalized path changes nothing
    #[test]
    fn normalize_is_idempotent(path in path_strategy(), flags in flags_strategy()) {
        let (tree, mut normalizer) = fixture();
        let name = tree.parse(&path, Interpretation::Portable);
        let once = normalizer.normalize(&name, flags, None).unwrap();
        let (twice, changed) = normalizer.normalize_with_change(&once, flags, None).unwrap();
        prop_assert_eq!(&twice, &once);
        prop_assert!(!changed);
    }

    // Results never keep `..` or lose their absolute marker
    #[test]
    fn normalized_paths_are_absolute_and_folded(path in path_strategy(), flags in flags_strategy()) {
        let (tree, mut normalizer) = fixture();
        let name = tree.parse(&path, Interpretation::Portable);
        let out = normalizer.normalize(&name, flags, None).unwrap();
        prop_assert!(out.is_absolute());
        prop_assert!(out.names().iter().all(|n| n != ".."));
    }

    // Parsing while normalizing agrees with parsing first
    #[test]
    fn normalize_str_matches_normalize(path in path_strategy(), flags in flags_strategy()) {
        let (tree, mut normalizer) = fixture();
        let name = tree.parse(&path, Interpretation::Portable);
        let expected = normalizer.normalize(&name, flags, None).unwrap();
        let direct = normalizer
            .normalize_str(&path, Interpretation::Portable, flags, None, Encoding::SystemDefault)
            .unwrap();
        prop_assert_eq!(direct, expected);
    }

    // Cached and uncached answers agree
    #[test]
    fn cache_is_transparent(path in path_strategy(), flags in flags_strategy()) {
        let (tree, mut normalizer) = fixture();
        let name = tree.parse(&path, Interpretation::Portable);
        let first = normalizer.normalize(&name, flags, None).unwrap();
        normalizer.clear_normalize_cache();
        normalizer.clear_symlink_cache();
        prop_assert_eq!(normalizer.normalize(&name, flags, None).unwrap(), first);
    }
}
