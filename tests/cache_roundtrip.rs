use std::path::PathBuf;

use memotrace::cache::DepCache;
use memotrace::fingerprint::ModTime;
use memotrace::snapshot::{DependencyEntry, Snapshot};
use memotrace_test_utils::builders::TempProject;

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn sample_snapshot() -> Snapshot {
    let mut snap = Snapshot::new();
    snap.push(DependencyEntry {
        path: PathBuf::from("b.txt"),
        content: Some("deadbeefdeadbeef".into()),
        modified: Some(ModTime {
            secs: 1_700_000_000,
            nanos: 5,
        }),
    });
    snap.push(DependencyEntry {
        path: PathBuf::from("a.txt"),
        content: None,
        modified: Some(ModTime {
            secs: -3,
            nanos: 999_999_999,
        }),
    });
    snap
}

#[test]
fn snapshot_round_trips_exactly() {
    let project = TempProject::new();
    let path = project.cache_path();
    let cmd = argv(&["cc", "-O2", "main.c"]);

    let mut cache = DepCache::default();
    cache.insert(&cmd, sample_snapshot());
    cache.store(&path).unwrap();

    let reloaded = DepCache::load(&path);
    assert_eq!(reloaded.lookup(&cmd), Some(&sample_snapshot()));
}

#[test]
fn entry_order_within_a_snapshot_is_preserved() {
    let project = TempProject::new();
    let path = project.cache_path();
    let cmd = argv(&["make", "all"]);

    let mut cache = DepCache::default();
    cache.insert(&cmd, sample_snapshot());
    cache.store(&path).unwrap();

    let reloaded = DepCache::load(&path);
    let paths: Vec<_> = reloaded
        .lookup(&cmd)
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.path.clone())
        .collect();
    assert_eq!(paths, vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")]);
}

#[test]
fn differing_argv_are_distinct_keys() {
    // The identity is the literal argument vector; flag order matters.
    let mut cache = DepCache::default();
    cache.insert(&argv(&["cc", "-a", "-b"]), Snapshot::new());

    assert!(cache.lookup(&argv(&["cc", "-a", "-b"])).is_some());
    assert!(cache.lookup(&argv(&["cc", "-b", "-a"])).is_none());
    assert!(cache.lookup(&argv(&["cc", "-a"])).is_none());
}

#[test]
fn missing_cache_file_loads_empty() {
    let project = TempProject::new();
    assert!(DepCache::load(&project.cache_path()).is_empty());
}

#[test]
fn corrupt_cache_file_loads_empty() {
    let project = TempProject::new();
    let path = project.write(".memotrace/deps", "this is [ not toml");
    assert!(DepCache::load(&path).is_empty());
}

#[test]
fn store_replaces_previous_contents_wholesale() {
    let project = TempProject::new();
    let path = project.cache_path();
    let cmd = argv(&["make"]);

    let mut cache = DepCache::default();
    cache.insert(&cmd, sample_snapshot());
    cache.store(&path).unwrap();

    let mut cache = DepCache::load(&path);
    cache.remove(&cmd);
    cache.store(&path).unwrap();

    assert!(DepCache::load(&path).lookup(&cmd).is_none());
}

#[test]
fn insert_replaces_an_existing_snapshot_wholesale() {
    let cmd = argv(&["gen"]);
    let mut cache = DepCache::default();
    cache.insert(&cmd, sample_snapshot());
    cache.insert(&cmd, Snapshot::new());

    assert_eq!(cache.len(), 1);
    assert!(cache.lookup(&cmd).unwrap().is_empty());
}

#[test]
fn multiple_commands_keep_their_own_snapshots() {
    let project = TempProject::new();
    let path = project.cache_path();

    let mut cache = DepCache::default();
    cache.insert(&argv(&["cmd", "one"]), sample_snapshot());
    cache.insert(&argv(&["cmd", "two"]), Snapshot::new());
    cache.store(&path).unwrap();

    let reloaded = DepCache::load(&path);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(
        reloaded.lookup(&argv(&["cmd", "one"])),
        Some(&sample_snapshot())
    );
    assert!(reloaded.lookup(&argv(&["cmd", "two"])).unwrap().is_empty());
}
