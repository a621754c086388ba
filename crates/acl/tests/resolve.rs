//! Tests for the path canonicalization utilities, driven through the fake
//! backend.

use acl::{AclError, resolve_absolute, resolve_lexical};
use std::path::{Path, PathBuf};
use test_support::FakeBackend;

#[test]
fn lexical_resolution_removes_dot_and_dot_dot_components() {
    let backend = FakeBackend::new();
    assert_eq!(
        PathBuf::from("/a/c"),
        resolve_lexical(&backend, Path::new("/a/./b/../c")).expect("resolve")
    );
}

#[test]
fn leading_dot_dot_collapses_to_root() {
    let backend = FakeBackend::new();
    assert_eq!(
        PathBuf::from("/x"),
        resolve_lexical(&backend, Path::new("/../x")).expect("resolve")
    );
}

#[test]
fn absolute_resolution_yields_an_absolute_path() {
    let backend = FakeBackend::new();
    let resolved =
        resolve_absolute(&backend, Path::new("relative/leaf")).expect("resolve");
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("relative/leaf"));
}

#[test]
fn over_long_paths_are_rejected_up_front() {
    let backend = FakeBackend::new();
    let long = PathBuf::from("x".repeat(libc::PATH_MAX as usize));
    match resolve_lexical(&backend, &long) {
        Err(AclError::PathTooLong(_)) => {}
        other => panic!("expected a path-length failure, got {other:?}"),
    }
}
