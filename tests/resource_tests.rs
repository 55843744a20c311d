//! Directory handle release tests.
//!
//! Every listing opens a directory stream. This binary lowers its own
//! open-file limit and then runs several times more listings than the limit
//! allows, so a handle leaked on any exit path surfaces as a failed open.
//! Tests are serialized so none of them eats another's descriptors.

use dirkind::{list_directories, try_list_entries, EntryKind, Error, Lister};
use std::fs;
use std::sync::{Mutex, MutexGuard, Once};
use tempfile::tempdir;

const FD_LIMIT: libc::rlim_t = 64;
const ROUNDS: usize = 4 * FD_LIMIT as usize;

/// Cap RLIMIT_NOFILE for this process and hold the serialization lock.
fn limited_descriptors() -> MutexGuard<'static, ()> {
    static LIMIT: Once = Once::new();
    static SERIAL: Mutex<()> = Mutex::new(());

    LIMIT.call_once(|| {
        let mut lim = libc::rlimit { rlim_cur: 0, rlim_max: 0 };
        assert_eq!(unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut lim) }, 0, "getrlimit");
        lim.rlim_cur = lim.rlim_cur.min(FD_LIMIT);
        assert_eq!(unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &lim) }, 0, "setrlimit");
    });

    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn test_descriptor_limit_in_effect() {
    let _guard = limited_descriptors();
    let dir = tempdir().expect("create temp dir");

    let mut held = Vec::new();
    let err = loop {
        match Lister::new(dir.path()).read() {
            Ok(entries) => held.push(entries),
            Err(err) => break err,
        }
        assert!(held.len() <= FD_LIMIT as usize, "open-file limit not applied");
    };
    assert!(
        matches!(err, Error::Open(ref e) if e.raw_os_error() == Some(libc::EMFILE)),
        "got {:?}",
        err
    );

    drop(held);
    assert!(try_list_entries(dir.path(), EntryKind::File).is_ok());
}

#[test]
fn test_completed_listings_release_handle() {
    let _guard = limited_descriptors();
    let dir = tempdir().expect("create temp dir");
    fs::create_dir(dir.path().join("sub")).expect("create sub");

    for round in 0..ROUNDS {
        let listed = try_list_entries(dir.path(), EntryKind::Directory)
            .unwrap_or_else(|e| panic!("round {} failed: {}", round, e));
        assert_eq!(listed, vec!["sub".to_string()]);
    }
}

#[test]
fn test_fail_soft_listings_release_handle() {
    let _guard = limited_descriptors();
    let dir = tempdir().expect("create temp dir");
    fs::create_dir(dir.path().join("sub")).expect("create sub");

    for round in 0..ROUNDS {
        assert_eq!(list_directories(dir.path()), vec!["sub".to_string()], "round {}", round);
    }
}

#[test]
fn test_abandoned_iterators_release_handle() {
    let _guard = limited_descriptors();
    let dir = tempdir().expect("create temp dir");
    for i in 0..4 {
        fs::write(dir.path().join(format!("f{}", i)), "x").expect("write file");
    }

    let lister = Lister::new(dir.path());
    for round in 0..ROUNDS {
        let mut entries = lister
            .read()
            .unwrap_or_else(|e| panic!("round {} failed: {}", round, e));
        // Take one entry and drop the rest of the stream.
        assert!(entries.next().is_some());
    }
}

#[test]
fn test_failed_opens_do_not_leak() {
    let _guard = limited_descriptors();
    let dir = tempdir().expect("create temp dir");
    let missing = dir.path().join("missing");

    for _ in 0..ROUNDS {
        assert!(list_directories(&missing).is_empty());
    }
    // Descriptors are still available afterwards.
    assert!(try_list_entries(dir.path(), EntryKind::File).is_ok());
}

#[test]
fn test_entries_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<dirkind::Entries>();

    let _guard = limited_descriptors();
    let dir = tempdir().expect("create temp dir");
    fs::create_dir(dir.path().join("moved")).expect("create dir");

    let entries = Lister::new(dir.path()).directories().read().expect("open dir");
    let names: Vec<String> = std::thread::spawn(move || {
        entries.map(|e| e.expect("entry").name).collect()
    })
    .join()
    .expect("thread panicked");

    assert_eq!(names, vec!["moved".to_string()]);
}
