//! Cache manager behavior: signature-keyed reuse, corruption degradation,
//! and pruning of superseded blobs.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trendex_core::{CacheOutcome, TrendexError, get_or_build};

fn write_week(dir: &Path, name: &str, rows: &str) {
    fs::write(
        dir.join(name),
        format!("Search Frequency Rank,Search Term\n{rows}"),
    )
    .unwrap();
}

fn seed_two_weeks(source: &Path) {
    write_week(source, "terms_2024_01_07.csv", "50,widget\n80,gadget\n");
    write_week(source, "terms_2024_01_14.csv", "30,widget\n70,gadget\n");
}

fn cache_blobs(cache: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(cache) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|name| name.starts_with("index_") && name.ends_with(".bin"))
        .collect();
    names.sort();
    names
}

#[test]
fn second_lookup_hits_without_reparsing() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("raw");
    let cache = tmp.path().join("store");
    fs::create_dir_all(&source).unwrap();
    seed_two_weeks(&source);

    let first = get_or_build(&source, &cache).unwrap();
    assert_eq!(first.outcome, CacheOutcome::MissBuilt);
    assert_eq!(cache_blobs(&cache).len(), 1);

    let second = get_or_build(&source, &cache).unwrap();
    assert_eq!(second.outcome, CacheOutcome::Hit, "no parser invocation");
    assert_eq!(second.signature, first.signature);
    assert_eq!(second.index, first.index, "cache round-trips the index");
}

#[test]
fn corrupted_blob_degrades_to_rebuild() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("raw");
    let cache = tmp.path().join("store");
    fs::create_dir_all(&source).unwrap();
    seed_two_weeks(&source);

    let first = get_or_build(&source, &cache).unwrap();
    let blob = cache.join(format!("index_{}.bin", first.signature));
    fs::write(&blob, b"definitely not bincode").unwrap();

    let recovered = get_or_build(&source, &cache).unwrap();
    assert_eq!(recovered.outcome, CacheOutcome::RebuiltAfterCorrupt);
    assert_eq!(recovered.index, first.index);

    // The rebuild re-persisted a good blob.
    let healed = get_or_build(&source, &cache).unwrap();
    assert_eq!(healed.outcome, CacheOutcome::Hit);
}

#[test]
fn superseded_blobs_are_pruned() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("raw");
    let cache = tmp.path().join("store");
    fs::create_dir_all(&source).unwrap();
    seed_two_weeks(&source);

    let first = get_or_build(&source, &cache).unwrap();

    write_week(&source, "terms_2024_01_21.csv", "10,widget\n60,gadget\n");
    let second = get_or_build(&source, &cache).unwrap();
    assert_ne!(second.signature, first.signature);
    assert_eq!(second.outcome, CacheOutcome::MissBuilt);

    let blobs = cache_blobs(&cache);
    assert_eq!(
        blobs,
        vec![format!("index_{}.bin", second.signature)],
        "only the current signature survives"
    );
}

#[test]
fn insufficient_source_is_an_error_not_a_cache_entry() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("raw");
    let cache = tmp.path().join("store");
    fs::create_dir_all(&source).unwrap();
    write_week(&source, "terms_2024_01_07.csv", "50,widget\n");

    let err = get_or_build(&source, &cache).unwrap_err();
    assert!(matches!(err, TrendexError::InsufficientData { found: 1 }));
    assert!(cache_blobs(&cache).is_empty());
}

#[test]
fn missing_source_dir_reports_zero_weeks() {
    let tmp = TempDir::new().unwrap();
    let err = get_or_build(&tmp.path().join("nope"), &tmp.path().join("store")).unwrap_err();
    assert!(matches!(err, TrendexError::InsufficientData { found: 0 }));
}
