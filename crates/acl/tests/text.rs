//! Tests for the text codec entry points, driven through the fake backend.

use acl::entry::{CLASS_OBJ, GROUP, GROUP_OBJ, OTHER_OBJ, USER, USER_OBJ};
use acl::{AclEntry, AclError, from_text, to_text};
use test_support::FakeBackend;

fn sample() -> Vec<AclEntry> {
    vec![
        AclEntry::new(USER_OBJ, 0, 0o6),
        AclEntry::new(USER, 1001, 0o7),
        AclEntry::new(GROUP_OBJ, 0, 0o4),
        AclEntry::new(GROUP, 10, 0o4),
        AclEntry::new(CLASS_OBJ, 0, 0o7),
        AclEntry::new(OTHER_OBJ, 0, 0o4),
    ]
}

#[test]
fn serialization_names_named_entries_by_id() {
    let backend = FakeBackend::new();
    let rendered = to_text(&backend, &sample()).expect("to_text");
    assert!(rendered.contains("user:1001:rwx"));
    assert!(rendered.contains("user::rw-"));
    assert!(rendered.contains("mask:rwx"));
}

#[test]
fn parse_inverts_serialization() {
    let backend = FakeBackend::new();
    let entries = sample();
    let rendered = to_text(&backend, &entries).expect("to_text");
    let reparsed = from_text(&backend, &rendered).expect("from_text");
    assert_eq!(entries, reparsed);
}

#[test]
fn unparseable_text_is_a_dedicated_error() {
    let backend = FakeBackend::new();
    match from_text(&backend, "not an acl") {
        Err(AclError::InvalidText) => {}
        other => panic!("expected the parse error, got {other:?}"),
    }
}
