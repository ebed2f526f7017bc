use std::io;
use std::rc::Rc;

use super::{NormalizeFlags, Normalizer, MAX_SYMLINK_DEPTH};
use crate::compare::CompareFlags;
use crate::error::Error;
use crate::fs::{MemoryFileSystem, MockFileSystem};
use crate::name::{Encoding, FileName, Interpretation};
use crate::tree::PathTree;

const NONE: NormalizeFlags = NormalizeFlags::empty();
const LOWER: NormalizeFlags = NormalizeFlags::LOWERCASE_ALWAYS;
const SYMLINKS: NormalizeFlags = NormalizeFlags::RESOLVE_SYMLINKS;

fn setup() -> (PathTree, Rc<MemoryFileSystem>, Normalizer) {
    let tree = PathTree::new();
    let fs = Rc::new(MemoryFileSystem::new());
    let normalizer = Normalizer::new(tree.clone(), Box::new(Rc::clone(&fs)));
    (tree, fs, normalizer)
}

fn portable(tree: &PathTree, s: &str) -> FileName {
    tree.parse(s, Interpretation::Portable)
}

#[test]
fn test_normalize_against_base() {
    let (tree, _fs, mut normalizer) = setup();
    let base = tree
        .named_root("C:", Encoding::SystemDefault)
        .join_name("Base");
    let lc_base = normalizer.normalize(&base, LOWER, None).unwrap();
    assert_eq!(lc_base.to_string(), "c:/base");

    let cases = [
        ("a", "C:/Base/a", "c:/base/a"),
        (".", "C:/Base", "c:/base"),
        ("..", "C:/", "c:/"),
        ("D:/", "D:/", "d:/"),
        ("a/b/..", "C:/Base/a", "c:/base/a"),
        ("C:foo", "C:/Base/foo", "c:/base/foo"),
        ("a/b/../c", "C:/Base/a/c", "c:/base/a/c"),
        ("C:/a/b/../c", "C:/a/c", "c:/a/c"),
        ("C:/a/../..", "C:/", "c:/"),
        ("\\\\foo.Bar/file", "\\\\foo.Bar/file", "\\\\foo.bar/file"),
        ("//foo.Bar/..", "\\\\foo.Bar/", "\\\\foo.bar/"),
        ("/a/b/../c", "C:/a/c", "c:/a/c"),
        ("D:/a/Bar/fO", "D:/a/Bar/fO", "d:/a/bar/fo"),
        ("c:/Foo", "c:/Foo", "c:/foo"),
    ];
    for (input, expected, expected_lower) in cases {
        let name = portable(&tree, input);
        let plain = normalizer.normalize(&name, NONE, Some(&base)).unwrap();
        assert_eq!(plain.to_string(), expected, "normalizing {input:?}");
        let lower = normalizer.normalize(&name, LOWER, Some(&lc_base)).unwrap();
        assert_eq!(lower.to_string(), expected_lower, "lowercasing {input:?}");

        let direct = normalizer
            .normalize_str(input, Interpretation::Portable, NONE, Some(&base), Encoding::SystemDefault)
            .unwrap();
        assert_eq!(direct, plain, "normalize_str {input:?}");
        let direct_lower = normalizer
            .normalize_str(input, Interpretation::Portable, LOWER, Some(&lc_base), Encoding::SystemDefault)
            .unwrap();
        assert_eq!(direct_lower, lower, "normalize_str lowercased {input:?}");
    }
}

#[test]
fn test_long_path_prefixes_normalize() {
    let (tree, _fs, mut normalizer) = setup();
    let base = portable(&tree, "C:/Base");
    for (input, expected) in [
        ("\\\\?\\C:\\file", "C:/file"),
        ("\\\\?\\UNC\\foo.Bar\\file", "\\\\foo.Bar/file"),
    ] {
        let name = tree.parse(input, Interpretation::Windows);
        let normalized = normalizer.normalize(&name, NONE, Some(&base)).unwrap();
        assert_eq!(normalized.to_string(), expected);
    }
}

#[test]
fn test_change_flag() {
    let (tree, _fs, mut normalizer) = setup();
    let clean = portable(&tree, "/a/b");
    let (out, changed) = normalizer.normalize_with_change(&clean, NONE, None).unwrap();
    assert_eq!(out, clean);
    assert!(!changed);

    let dotted = portable(&tree, "/a/../b");
    for _ in 0..2 {
        let (out, changed) = normalizer.normalize_with_change(&dotted, NONE, None).unwrap();
        assert_eq!(out.to_string(), "/b");
        assert!(changed);
    }

    // Completion is always a change.
    let relative = portable(&tree, "x");
    let (out, changed) = normalizer.normalize_with_change(&relative, NONE, None).unwrap();
    assert_eq!(out.to_string(), "/x");
    assert!(changed);

    // Re-casing the filesystem of a cached path is still reported.
    let upper = portable(&tree, "C:/a");
    let lower = portable(&tree, "c:/a");
    assert!(!normalizer.normalize_with_change(&lower, LOWER, None).unwrap().1);
    let (out, changed) = normalizer.normalize_with_change(&upper, LOWER, None).unwrap();
    assert_eq!(out, lower);
    assert!(changed);
}

#[test]
fn test_default_base_is_normalized() {
    let (tree, fs, mut normalizer) = setup();
    fs.set_current_dir("C:/Cwd");
    let out = normalizer
        .normalize(&portable(&tree, "x/Y"), LOWER, None)
        .unwrap();
    assert_eq!(out.to_string(), "c:/cwd/x/y");

    // An absolute path without filesystem takes the working drive.
    let out = normalizer.normalize(&portable(&tree, "/a"), NONE, None).unwrap();
    assert_eq!(out.to_string(), "C:/a");
    let out = normalizer.normalize(&portable(&tree, "/a"), LOWER, None).unwrap();
    assert_eq!(out.to_string(), "c:/a");
}

#[test]
fn test_initial_path_is_memoized() {
    let (_tree, fs, mut normalizer) = setup();
    fs.set_current_dir("/first");
    let first = normalizer.initial_path(Encoding::SystemDefault).unwrap();
    fs.set_current_dir("/second");
    assert_eq!(normalizer.initial_path(Encoding::SystemDefault).unwrap(), first);
    assert_eq!(
        normalizer.current_path(Encoding::SystemDefault).unwrap().to_string(),
        "/second"
    );
    // Each encoding is queried separately.
    let utf8 = normalizer.initial_path(Encoding::Utf8).unwrap();
    assert_eq!(utf8.to_string(), "/second");
    assert_eq!(utf8.encoding(), Encoding::Utf8);
}

#[test]
fn test_drive_relative_paths() {
    let (tree, fs, mut normalizer) = setup();
    fs.set_drive_dir('D', "D:/work");
    let base = portable(&tree, "C:/Base");

    let out = normalizer
        .normalize(&portable(&tree, "D:src/../x"), NONE, Some(&base))
        .unwrap();
    assert_eq!(out.to_string(), "D:/work/x");

    // Without a working directory for the drive the text is appended.
    let out = normalizer
        .normalize(&portable(&tree, "E:foo"), NONE, Some(&base))
        .unwrap();
    assert_eq!(out.to_string(), "C:/Base/E:foo");
}

#[test]
fn test_resolve_symlinks_through_dotdot() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_dir("/t/aaa");
    fs.add_dir("/t/bbb");
    fs.add_symlink("/t/bbb/ccc", "../aaa");

    let orig = portable(&tree, "/t/bbb/ccc/../foo.h");
    let expected = portable(&tree, "/t/foo.h");
    assert_eq!(normalizer.normalize(&orig, SYMLINKS, None).unwrap(), expected);
    // `..` resolves the link it climbs out of even without the flag.
    assert_eq!(normalizer.normalize(&orig, NONE, None).unwrap(), expected);

    let resolved = normalizer
        .normalize(&portable(&tree, "/t/bbb/ccc/x"), SYMLINKS, None)
        .unwrap();
    assert_eq!(resolved.to_string(), "/t/aaa/x");

    let kept = normalizer
        .normalize(&orig, NormalizeFlags::PRESERVE_RELATIVE, None)
        .unwrap();
    assert_eq!(kept, orig);
}

#[test]
fn test_resolve_symlink_operations() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_dir("/t/aaa");
    fs.add_symlink("/t/one", "two");
    fs.add_symlink("/t/two", "/t/aaa");

    let one = portable(&tree, "/t/one");
    assert_eq!(
        normalizer.resolve_symlink(&one).unwrap().unwrap().to_string(),
        "/t/two"
    );
    assert_eq!(normalizer.resolve_all_symlinks(&one).unwrap().to_string(), "/t/aaa");
    let plain = portable(&tree, "/t/aaa");
    assert!(normalizer.resolve_symlink(&plain).unwrap().is_none());
    assert_eq!(normalizer.resolve_all_symlinks(&plain).unwrap(), plain);
    assert!(normalizer.resolve_symlink(&tree.absolute_root(Encoding::SystemDefault)).unwrap().is_none());
}

#[test]
fn test_symlink_loop() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_symlink("/loop/a", "b");
    fs.add_symlink("/loop/b", "a");
    let err = normalizer
        .normalize(&portable(&tree, "/loop/a"), SYMLINKS, None)
        .unwrap_err();
    assert!(matches!(err, Error::SymlinkLoop { limit, .. } if limit == MAX_SYMLINK_DEPTH));
}

#[test]
fn test_symlink_into_itself() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_symlink("/s/x", "x/y");
    let err = normalizer
        .normalize(&portable(&tree, "/s/x"), SYMLINKS, None)
        .unwrap_err();
    assert!(matches!(err, Error::SymlinkLoop { .. }));
    assert!(err.to_string().contains("too many levels of symlinks"));
}

#[test]
fn test_normalize_case() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_file("C:/Program Files/App.EXE", 1);
    let flags = NormalizeFlags::NORMALIZE_CASE;

    let out = normalizer
        .normalize(&portable(&tree, "c:/program files/app.exe"), flags, None)
        .unwrap();
    assert_eq!(out.to_string(), "C:/Program Files/App.EXE");

    let out = normalizer
        .normalize(&portable(&tree, "c:/program files/nope"), flags, None)
        .unwrap();
    assert_eq!(out.to_string(), "C:/Program Files/nope");
}

#[test]
fn test_caches_are_stale_until_cleared() {
    let (tree, fs, mut normalizer) = setup();
    let flags = NormalizeFlags::NORMALIZE_CASE;
    let name = portable(&tree, "C:/x/readme");
    assert_eq!(normalizer.normalize(&name, flags, None).unwrap(), name);

    fs.add_file("C:/X/ReadMe", 0);
    assert_eq!(normalizer.normalize(&name, flags, None).unwrap(), name);
    normalizer.clear_normalize_cache();
    assert_eq!(
        normalizer.normalize(&name, flags, None).unwrap().to_string(),
        "C:/X/ReadMe"
    );

    let link = portable(&tree, "/u/link");
    assert_eq!(normalizer.normalize(&link, SYMLINKS, None).unwrap(), link);
    fs.add_dir("/real");
    fs.add_symlink("/u/link", "/real");
    normalizer.clear_normalize_cache();
    // The symlink answer is still cached.
    assert_eq!(normalizer.normalize(&link, SYMLINKS, None).unwrap(), link);
    normalizer.clear_symlink_cache();
    assert_eq!(
        normalizer.normalize(&link, SYMLINKS, None).unwrap().to_string(),
        "/real"
    );
}

#[test]
fn test_long_and_short_names() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_dir("C:/Program Files/app");
    fs.add_short_name("C:/Program Files", "PROGRA~1");

    let long = portable(&tree, "C:/Program Files/app");
    let short = normalizer
        .normalize(&long, NormalizeFlags::SHORT_NAME, None)
        .unwrap();
    assert_eq!(short.to_string(), "C:/PROGRA~1/app");
    let back = normalizer
        .normalize(&short, NormalizeFlags::LONG_NAME, None)
        .unwrap();
    assert_eq!(back, long);

    let dir = portable(&tree, "C:/Program Files");
    assert_eq!(
        normalizer.resolve_short_name(&dir).unwrap().to_string(),
        "C:/PROGRA~1"
    );
    assert_eq!(
        normalizer
            .resolve_long_name(&portable(&tree, "C:/PROGRA~1"))
            .unwrap(),
        dir
    );
    let root = tree.named_root("C:", Encoding::SystemDefault);
    assert_eq!(normalizer.resolve_short_name(&root).unwrap(), root);
}

#[test]
fn test_short_name_lowercased() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_dir("c:/program files");
    fs.add_short_name("c:/program files", "PROGRA~1");
    let flags = NormalizeFlags::SHORT_NAME | LOWER;
    let out = normalizer
        .normalize(&portable(&tree, "C:/Program Files/x"), flags, None)
        .unwrap();
    assert_eq!(out.to_string(), "c:/progra~1/x");
}

#[test]
fn test_preserve_relative() {
    let (tree, _fs, mut normalizer) = setup();
    let base = portable(&tree, "C:/Base");
    let flags = NormalizeFlags::NORMALIZE_CASE | NormalizeFlags::PRESERVE_RELATIVE;
    let out = normalizer
        .normalize(&tree.parse("a/b/../c", Interpretation::Unix), flags, Some(&base))
        .unwrap();
    assert_eq!(out.to_string(), "C:/Base/a/b/../c");
}

#[test]
fn test_make_relative() {
    let (tree, _fs, mut normalizer) = setup();
    let base = tree.named_root("A:", Encoding::SystemDefault);
    let unix = |s: &str| tree.parse(s, Interpretation::Unix);
    let f1 = unix("/A/b/C/d");
    let ci = CompareFlags::CASE_INSENSITIVE;
    let none = CompareFlags::empty();

    let mut rel = |p: &FileName, to: &FileName, flags| {
        normalizer
            .make_relative(p, to, flags, Some(&base))
            .unwrap()
            .to_string()
    };
    assert_eq!(rel(&f1, &unix("/A/B"), none), "../b/C/d");
    assert_eq!(rel(&f1, &unix("/A/B"), ci), "C/d");
    assert_eq!(rel(&f1, &unix("/A/b"), none), "C/d");
    assert_eq!(rel(&f1, &unix("/A/C"), none), "../b/C/d");
    assert_eq!(rel(&f1, &unix("/d/e"), none), "A:/A/b/C/d");

    let fw1 = portable(&tree, "A:/b/c/d");
    for (to, expected) in [
        ("A:/b/c", "d"),
        ("A:/b/C", "d"),
        ("a:/b/c", "d"),
        ("B:/b/c", "A:/b/c/d"),
        ("A:/d/c", "A:/b/c/d"),
    ] {
        assert_eq!(rel(&fw1, &portable(&tree, to), ci), expected, "relative to {to}");
    }
}

#[test]
fn test_long_path_string() {
    let (tree, _fs, mut normalizer) = setup();
    let name = portable(&tree, "C:/a/../b");
    assert_eq!(normalizer.long_path_string(&name).unwrap(), "\\\\?\\C:\\b");
}

#[test]
fn test_idempotent() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_dir("/t/aaa");
    fs.add_symlink("/t/l", "aaa");
    for flags in [NONE, LOWER, SYMLINKS, NormalizeFlags::NORMALIZE_CASE] {
        for input in ["/t/l/../x", "T/L", "C:/A/./b/..", "\\\\Host/share/.."] {
            let once = normalizer.normalize(&portable(&tree, input), flags, None).unwrap();
            let twice = normalizer.normalize(&once, flags, None).unwrap();
            assert_eq!(once, twice, "{input} with {flags}");
        }
    }
}

#[test]
fn test_all_nodes_released() {
    let (tree, fs, mut normalizer) = setup();
    fs.add_symlink("/t/l", "/u");
    {
        let name = portable(&tree, "/t/l/../x/y");
        normalizer.normalize(&name, SYMLINKS, None).unwrap();
        normalizer.normalize(&name, LOWER, None).unwrap();
        assert!(normalizer.cached_entries() > 0);
    }
    normalizer.clear_normalize_cache();
    normalizer.clear_symlink_cache();
    assert_eq!(normalizer.cached_entries(), 0);
    drop(normalizer);
    assert_eq!(tree.live_nodes(), 1);
}

fn mock_with_cwd() -> MockFileSystem {
    let mut mock = MockFileSystem::new();
    mock.expect_current_dir().returning(|| Ok("/w".to_string()));
    mock.expect_interpretation()
        .return_const(Interpretation::Portable);
    mock
}

#[test]
fn test_readlink_failure_propagates() {
    let mut mock = mock_with_cwd();
    mock.expect_read_symlink_target()
        .returning(|_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
    let tree = PathTree::new();
    let mut normalizer = Normalizer::new(tree.clone(), Box::new(mock));

    let err = normalizer
        .normalize(&portable(&tree, "/a/.."), NONE, None)
        .unwrap_err();
    assert!(err.is_permission_denied());
    assert!(matches!(err, Error::System { operation: "read_symlink_target", .. }));
}

#[test]
fn test_case_query_failure_propagates() {
    let mut mock = mock_with_cwd();
    mock.expect_canonical_case()
        .times(1)
        .returning(|_| Err(io::Error::other("device gone")));
    let tree = PathTree::new();
    let mut normalizer = Normalizer::new(tree.clone(), Box::new(mock));

    let err = normalizer
        .normalize(&portable(&tree, "/a"), NormalizeFlags::NORMALIZE_CASE, None)
        .unwrap_err();
    assert!(matches!(err, Error::System { operation: "canonical_case", .. }));
}

#[test]
fn test_case_answers_shared_across_spellings() {
    let mut mock = mock_with_cwd();
    mock.expect_canonical_case().times(2).returning(|path| {
        let last = path.rsplit('/').next().unwrap_or_default();
        let on_disk = if last.eq_ignore_ascii_case("dir") { "Dir" } else { "File.txt" };
        Ok(Some(on_disk.to_string()))
    });
    let tree = PathTree::new();
    let mut normalizer = Normalizer::new(tree.clone(), Box::new(mock));
    let flags = NormalizeFlags::NORMALIZE_CASE;

    for spelling in ["/dir/file.txt", "/DIR/FILE.TXT", "/Dir/File.txt"] {
        let out = normalizer
            .normalize(&portable(&tree, spelling), flags, None)
            .unwrap();
        assert_eq!(out.to_string(), "/Dir/File.txt");
    }
}

#[test]
fn test_missing_entries_are_not_errors() {
    let mut mock = mock_with_cwd();
    mock.expect_read_symlink_target().returning(|_| Ok(None));
    mock.expect_canonical_case().returning(|_| Ok(None));
    let tree = PathTree::new();
    let mut normalizer = Normalizer::new(tree.clone(), Box::new(mock));
    let flags = NormalizeFlags::NORMALIZE_CASE | SYMLINKS;
    let out = normalizer
        .normalize(&portable(&tree, "rel/../Name"), flags, None)
        .unwrap();
    assert_eq!(out.to_string(), "/w/Name");
}

#[test]
#[should_panic(expected = "base must be absolute")]
fn test_relative_base_panics() {
    let (tree, _fs, mut normalizer) = setup();
    let base = portable(&tree, "rel");
    let _ = normalizer.normalize(&portable(&tree, "x"), NONE, Some(&base));
}
