//! Latest-file resolution against temporary directories.

use std::fs;

use storage::{LocalStore, StorageError, FALLBACK_FILE_NAME};
use test_utils::temp_test_dir;

fn touch(store: &LocalStore, name: &str) {
    fs::write(store.root().join(name), b"").unwrap();
}

#[test]
fn test_open_creates_directory() {
    let dir = temp_test_dir();
    let root = dir.path().join("nested").join("_store");

    let store = LocalStore::open(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_latest_is_lexicographically_greatest() {
    let dir = temp_test_dir();
    let store = LocalStore::open(dir.path()).unwrap();
    touch(&store, "hkhEnsemble_202510020000_hourly_latlon.nc");
    touch(&store, "hkhEnsemble_202510040000_hourly_latlon.nc");
    touch(&store, "hkhEnsemble_202510030000_hourly_latlon.nc");
    touch(&store, "zzz_notes.txt");

    let latest = store.ensure_latest().unwrap();

    assert_eq!(
        latest.file_name().unwrap(),
        "hkhEnsemble_202510040000_hourly_latlon.nc"
    );
}

#[test]
fn test_any_nc_file_counts() {
    let dir = temp_test_dir();
    let store = LocalStore::open(dir.path()).unwrap();
    touch(&store, "hkhEnsemble_202510040000_hourly_latlon.nc");
    touch(&store, "sample.nc");

    let latest = store.ensure_latest().unwrap();

    assert_eq!(latest.file_name().unwrap(), "sample.nc");
    assert_eq!(store.list_runs().unwrap().len(), 1);
}

#[test]
fn test_fallback_file_is_found() {
    let dir = temp_test_dir();
    let store = LocalStore::open(dir.path()).unwrap();
    touch(&store, FALLBACK_FILE_NAME);

    let latest = store.ensure_latest().unwrap();

    assert_eq!(latest, dir.path().join(FALLBACK_FILE_NAME));
}

#[test]
fn test_empty_store_has_no_data() {
    let dir = temp_test_dir();
    let store = LocalStore::open(dir.path()).unwrap();
    touch(&store, "readme.md");

    let err = store.ensure_latest().unwrap_err();

    assert!(matches!(err, StorageError::NoDataAvailable { .. }));
    assert!(err.to_string().starts_with("No NetCDF found in"));
}

#[test]
fn test_directories_are_not_data_files() {
    let dir = temp_test_dir();
    let store = LocalStore::open(dir.path()).unwrap();
    fs::create_dir(store.root().join("archive.nc")).unwrap();

    assert!(store.data_files().unwrap().is_empty());
    assert!(store.ensure_latest().is_err());
}

#[test]
fn test_list_runs_sorted() {
    let dir = temp_test_dir();
    let store = LocalStore::open(dir.path()).unwrap();
    touch(&store, "hkhEnsemble_202510040000_hourly_latlon.nc");
    touch(&store, "hkhEnsemble_202510020000_hourly_latlon.nc");

    let runs = store.list_runs().unwrap();

    assert_eq!(runs.len(), 2);
    assert!(runs[0].run_time < runs[1].run_time);
    assert_eq!(runs[0].prefix, "hkhEnsemble");
}
