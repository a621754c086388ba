//! Tests for the per-target accessor operations, driven through the fake
//! backend.

use acl::entry::{CLASS_OBJ, GROUP_OBJ, OTHER_OBJ, USER, USER_OBJ};
use acl::{
    AclEntry, AclError, MIN_ACL_ENTRIES, Target, count, is_trivial, read, write, write_text,
};
use std::path::PathBuf;
use test_support::FakeBackend;

fn extended_entries() -> Vec<AclEntry> {
    vec![
        AclEntry::new(USER_OBJ, 0, 0o6),
        AclEntry::new(USER, 1001, 0o7),
        AclEntry::new(GROUP_OBJ, 0, 0o4),
        AclEntry::new(CLASS_OBJ, 0, 0o7),
        AclEntry::new(OTHER_OBJ, 0, 0o4),
    ]
}

#[test]
fn count_is_raw_and_never_normalized() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/trivial");
    backend.install_trivial(&path);

    let counted = count(&backend, Target::from(&path)).expect("count");
    assert_eq!(MIN_ACL_ENTRIES, counted);
}

#[test]
fn read_returns_none_for_trivial_objects() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/trivial");
    backend.install_trivial(&path);

    assert!(read(&backend, Target::from(&path)).expect("read").is_none());
    assert!(is_trivial(&backend, Target::from(&path)).expect("trivial"));
}

#[test]
fn read_preserves_order_for_extended_objects() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/extended");
    let entries = extended_entries();
    backend.install_path(&path, &entries);

    let observed = read(&backend, Target::from(&path))
        .expect("read")
        .expect("extended object yields entries");
    assert_eq!(entries, observed);
    assert!(!is_trivial(&backend, Target::from(&path)).expect("trivial"));
}

#[test]
fn read_aborts_when_fetch_disagrees_with_count() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/racing");
    backend.install_path(&path, &extended_entries());
    backend.force_count(7);

    match read(&backend, Target::from(&path)) {
        Err(AclError::EntryCountMismatch {
            counted, fetched, ..
        }) => {
            assert_eq!(7, counted);
            assert_eq!(5, fetched);
        }
        other => panic!("expected a count mismatch, got {other:?}"),
    }
}

#[test]
fn over_long_paths_fail_before_any_syscall() {
    let backend = FakeBackend::new();
    let long = PathBuf::from("/".repeat(libc::PATH_MAX as usize + 1));

    match count(&backend, Target::from(&long)) {
        Err(AclError::PathTooLong(limit)) => {
            assert_eq!(libc::PATH_MAX as usize, limit);
        }
        other => panic!("expected a path-length failure, got {other:?}"),
    }
    assert_eq!(0, backend.syscall_count());
}

#[test]
fn os_errors_propagate_verbatim() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/absent");

    let error = count(&backend, Target::from(&path))
        .expect_err("unregistered path reports ENOENT");
    let source = error.io_source().expect("os failure carries a source");
    assert_eq!(Some(libc::ENOENT), source.raw_os_error());
}

#[test]
fn write_then_read_round_trips() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/file");
    backend.install_trivial(&path);

    let entries = extended_entries();
    write(&backend, Target::from(&path), &entries).expect("write");
    let observed = read(&backend, Target::from(&path))
        .expect("read")
        .expect("written object is extended");
    assert_eq!(entries, observed);
}

#[test]
fn write_rejects_inconsistent_lists_without_touching_the_acl() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/file");
    backend.install_trivial(&path);

    let mut entries = extended_entries();
    entries.push(AclEntry::new(CLASS_OBJ, 0, 0o4));
    let error = write(&backend, Target::from(&path), &entries)
        .expect_err("duplicate mask entries fail validation");
    match error {
        AclError::Validation(violation) => {
            assert_eq!(Some(5), violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
    // The prior (trivial) ACL must be untouched.
    assert!(is_trivial(&backend, Target::from(&path)).expect("trivial"));
}

#[test]
fn write_surfaces_os_rejection_of_the_replace_call() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/file");
    backend.install_trivial(&path);
    backend.fail_replace(libc::EPERM);

    let error = write(&backend, Target::from(&path), &extended_entries())
        .expect_err("replace failure propagates");
    let source = error.io_source().expect("os failure carries a source");
    assert_eq!(Some(libc::EPERM), source.raw_os_error());
}

#[test]
fn write_text_distinguishes_parse_failures_from_validation() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/data/file");
    backend.install_trivial(&path);

    match write_text(&backend, Target::from(&path), "bogus") {
        Err(AclError::InvalidText) => {}
        other => panic!("expected a parse failure, got {other:?}"),
    }
    assert!(is_trivial(&backend, Target::from(&path)).expect("trivial"));
}

#[test]
fn descriptor_targets_share_the_same_protocol() {
    let backend = FakeBackend::new();
    let file = tempfile::tempfile().expect("tempfile");
    let fd = std::os::fd::AsFd::as_fd(&file);
    backend.install_fd(&fd, &extended_entries());

    let counted = count(&backend, Target::fd(fd)).expect("count");
    assert_eq!(5, counted);
    let observed = read(&backend, Target::fd(fd))
        .expect("read")
        .expect("extended object yields entries");
    assert_eq!(extended_entries(), observed);
}
