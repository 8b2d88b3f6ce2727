use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use memotrace::fingerprint::{self, FingerprintMode, Unreadable};
use memotrace::snapshot::{self, DependencyEntry, Snapshot};
use memotrace_test_utils::builders::TempProject;

fn entry_for(path: &Path) -> DependencyEntry {
    DependencyEntry {
        content: fingerprint::content_hash(path).ok(),
        modified: fingerprint::mod_time(path).ok(),
        path: path.to_path_buf(),
    }
}

#[test]
fn unchanged_files_are_up_to_date_in_both_modes() {
    let project = TempProject::new();
    let a = project.write("a.txt", "x");
    let b = project.write("sub/b.txt", "y");

    let mut snap = Snapshot::new();
    snap.push(entry_for(&a));
    snap.push(entry_for(&b));

    assert!(snapshot::is_up_to_date(&snap, FingerprintMode::Content));
    assert!(snapshot::is_up_to_date(&snap, FingerprintMode::ModTime));
}

#[test]
fn content_change_is_stale_in_content_mode() {
    let project = TempProject::new();
    let a = project.write("a.txt", "x");

    let mut snap = Snapshot::new();
    snap.push(entry_for(&a));

    fs::write(&a, "y").unwrap();
    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::Content));
}

#[test]
fn mtime_change_is_stale_in_modtime_mode_but_not_content_mode() {
    let project = TempProject::new();
    let a = project.write("a.txt", "x");

    let mut snap = Snapshot::new();
    snap.push(entry_for(&a));

    // Rewind the mtime to a fixed point far from "now"; the content is
    // untouched.
    let file = fs::File::options().write(true).open(&a).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000))
        .unwrap();

    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::ModTime));
    assert!(snapshot::is_up_to_date(&snap, FingerprintMode::Content));
}

#[test]
fn vanished_file_is_stale_in_both_modes() {
    let project = TempProject::new();
    let a = project.write("a.txt", "x");

    let mut snap = Snapshot::new();
    snap.push(entry_for(&a));

    fs::remove_file(&a).unwrap();
    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::Content));
    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::ModTime));
}

#[test]
fn stored_unreadable_sentinel_never_matches() {
    // The file is perfectly readable now, but it was not at record
    // time; the stored sentinel must still read as changed.
    let project = TempProject::new();
    let a = project.write("a.txt", "x");

    let mut snap = Snapshot::new();
    snap.push(DependencyEntry {
        path: a,
        content: None,
        modified: None,
    });

    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::Content));
    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::ModTime));
}

#[test]
fn evaluation_short_circuits_but_any_stale_entry_suffices() {
    let project = TempProject::new();
    let a = project.write("a.txt", "x");
    let b = project.write("b.txt", "y");

    let mut snap = Snapshot::new();
    snap.push(entry_for(&a));
    snap.push(entry_for(&b));

    // Only the *last* entry changes; the walk must still find it.
    fs::write(&b, "changed").unwrap();
    assert!(!snapshot::is_up_to_date(&snap, FingerprintMode::Content));
}

#[test]
fn empty_snapshot_is_vacuously_up_to_date() {
    assert!(snapshot::is_up_to_date(
        &Snapshot::new(),
        FingerprintMode::Content
    ));
    assert!(snapshot::is_up_to_date(
        &Snapshot::new(),
        FingerprintMode::ModTime
    ));
}

#[test]
fn fingerprint_failures_are_values_not_errors() {
    let missing = Path::new("/definitely/not/here/nope.txt");
    assert_eq!(fingerprint::content_hash(missing), Err(Unreadable));
    assert_eq!(fingerprint::mod_time(missing), Err(Unreadable));
}

#[test]
fn content_hash_is_stable_across_identical_copies() {
    let project = TempProject::new();
    let a = project.write("a.txt", "same bytes");
    let b = project.write("b.txt", "same bytes");

    assert_eq!(
        fingerprint::content_hash(&a).unwrap(),
        fingerprint::content_hash(&b).unwrap()
    );
}
