//! Directory walk behaviour against real evidence trees

use fhash_core::{AbortSignal, Digester, Error, ExcludedExtensions, HashAlgorithm};
use fhash_test_utils::{EvidenceTreeBuilder, FailingMetadataExtractor, vectors};
use std::sync::Arc;

#[test]
fn test_case1_tree_digest() {
    let tree = EvidenceTreeBuilder::case1().unwrap();
    let digest = Digester::new()
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    assert_eq!(digest.results.len(), 2);
    assert_eq!(digest.summary.total_files, 2);
    assert_eq!(digest.summary.total_size, 4);

    let a = &digest.results[0];
    assert_eq!(a.metadata.name, "a.txt");
    assert_eq!(a.metadata.extension, ".txt");
    assert_eq!(a.hashes.get(HashAlgorithm::Sha256), Some(vectors::TEST_SHA256));

    let b = &digest.results[1];
    assert_eq!(b.metadata.name, "b.bin");
    assert_eq!(b.metadata.size, 0);
}

#[test]
fn test_excluded_extension_is_left_out_of_results_and_summary() {
    let tree = EvidenceTreeBuilder::case1().unwrap();
    let excluded: ExcludedExtensions = [".bin"].into_iter().collect();

    let digest = Digester::new().digest_tree(tree.root(), &excluded).unwrap();

    assert_eq!(digest.results.len(), 1);
    assert_eq!(digest.results[0].metadata.name, "a.txt");
    assert_eq!(digest.summary.total_files, 1);
    assert_eq!(digest.summary.total_size, 4);
}

#[test]
fn test_summary_matches_results() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    tree.add_deterministic_file("x/1.dat", 10_000, 1).unwrap();
    tree.add_deterministic_file("x/y/2.dat", 3, 2).unwrap();
    tree.add_file("z.log", b"log line\n").unwrap();
    tree.add_dir("empty").unwrap();

    let digest = Digester::new()
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    let total: u64 = digest.results.iter().map(|r| r.metadata.size).sum();
    assert_eq!(digest.summary.total_files, digest.results.len() as u64);
    assert_eq!(digest.summary.total_size, total);
    assert_eq!(digest.results.len(), 3);
}

#[test]
fn test_traversal_is_lexical_and_repeatable() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    tree.add_file("b/2.txt", b"2").unwrap();
    tree.add_file("a.txt", b"a").unwrap();
    tree.add_file("b/1.txt", b"1").unwrap();
    tree.add_file("c.txt", b"c").unwrap();

    let digester = Digester::new();
    let first = digester
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();
    let second = digester
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    let names: Vec<_> = first
        .results
        .iter()
        .map(|r| r.metadata.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.txt", "1.txt", "2.txt", "c.txt"]);
    assert_eq!(first, second);
}

#[test]
fn test_empty_file_matches_empty_text() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    let path = tree.add_file("empty.dat", b"").unwrap();

    let digester = Digester::new();
    let record = digester.hash_file(&path).unwrap();

    assert_eq!(record.hashes, digester.digest_text(""));
    for (algorithm, expected) in vectors::EMPTY {
        assert_eq!(record.hashes.get(algorithm), Some(expected));
    }
}

#[test]
fn test_identical_content_at_different_paths() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    tree.add_deterministic_file("one/copy.bin", 20_000, 9).unwrap();
    tree.add_deterministic_file("two/copy.bin", 20_000, 9).unwrap();

    let digest = Digester::new()
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    assert_eq!(digest.results.len(), 2);
    assert_eq!(digest.results[0].hashes, digest.results[1].hashes);
    assert_ne!(digest.results[0].metadata.path, digest.results[1].metadata.path);
}

#[test]
fn test_missing_root_fails() {
    let tree = EvidenceTreeBuilder::new().unwrap();
    let result = Digester::new().digest_tree(&tree.root().join("absent"), &ExcludedExtensions::none());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_file_root_fails() {
    let tree = EvidenceTreeBuilder::case1().unwrap();
    let result =
        Digester::new().digest_tree(&tree.root().join("a.txt"), &ExcludedExtensions::none());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_abort_ends_walk() {
    let tree = EvidenceTreeBuilder::case1().unwrap();
    let signal = AbortSignal::new();
    signal.abort();

    let result = Digester::new()
        .with_abort_signal(signal)
        .digest_tree(tree.root(), &ExcludedExtensions::none());

    assert!(result.unwrap_err().is_cancelled());
}

#[test]
fn test_metadata_failures_are_skipped() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    tree.add_file("ok_1.txt", b"one").unwrap();
    let broken_a = tree.add_file("broken_a.txt", b"secret").unwrap();
    tree.add_file("ok_2.txt", b"two").unwrap();
    let broken_b = tree.add_file("sub/broken_b.bin", b"more secrets").unwrap();
    tree.add_file("sub/ok_3.txt", b"three").unwrap();

    let extractor = FailingMetadataExtractor::for_paths([broken_a, broken_b]);
    let digest = Digester::new()
        .with_metadata_extractor(Arc::new(extractor))
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    let names: Vec<&str> = digest
        .results
        .iter()
        .map(|r| r.metadata.name.as_str())
        .collect();
    assert_eq!(names, ["ok_1.txt", "ok_2.txt", "ok_3.txt"]);
    assert_eq!(digest.summary.total_files, 3);
    assert_eq!(digest.summary.total_size, 11);
}

#[test]
fn test_metadata_failure_fails_single_file() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    let path = tree.add_file("a.txt", b"test").unwrap();

    let error = Digester::new()
        .with_metadata_extractor(Arc::new(FailingMetadataExtractor::for_paths([path.clone()])))
        .hash_file(&path)
        .unwrap_err();

    assert!(matches!(error, Error::Io(_)));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_names_keep_json_output() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let mut tree = EvidenceTreeBuilder::new().unwrap();
    tree.add_file("a.txt", b"test").unwrap();
    let odd = tree.root().join(OsStr::from_bytes(b"bad\xffname.bin"));
    std::fs::write(&odd, b"xyz").unwrap();

    let digest = Digester::new()
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();
    assert_eq!(digest.results.len(), 2);

    let json = serde_json::to_value(&digest).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    let path = results[1]["metadata"]["File Path"].as_str().unwrap();
    assert!(path.ends_with("bad\u{FFFD}name.bin"));
    assert_eq!(results[1]["metadata"]["File Name"], "bad\u{FFFD}name.bin");
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_skipped() {
    let mut tree = EvidenceTreeBuilder::case1().unwrap();
    let target = tree.root().join("a.txt");
    let missing = tree.root().join("gone");
    tree.add_symlink("link.txt", &target).unwrap();
    tree.add_symlink("dangling.txt", &missing).unwrap();

    let digest = Digester::new()
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    assert_eq!(digest.results.len(), 2);
    assert!(digest.results.iter().all(|r| r.metadata.name != "link.txt"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_files_are_skipped() {
    let mut tree = EvidenceTreeBuilder::new().unwrap();
    tree.add_file("ok_1.txt", b"one").unwrap();
    tree.add_file("ok_2.txt", b"two").unwrap();
    tree.add_file("ok_3.txt", b"three").unwrap();
    let locked_a = tree.add_file("locked_a.txt", b"secret").unwrap();
    let locked_b = tree.add_file("locked_b.txt", b"secret").unwrap();
    tree.make_unreadable(&locked_a).unwrap();
    tree.make_unreadable(&locked_b).unwrap();

    // Privileged users can still open the files
    if std::fs::File::open(&locked_a).is_ok() {
        return;
    }

    let digest = Digester::new()
        .digest_tree(tree.root(), &ExcludedExtensions::none())
        .unwrap();

    assert_eq!(digest.results.len(), 3);
    assert_eq!(digest.summary.total_files, 3);
    assert_eq!(digest.summary.total_size, 11);
}
