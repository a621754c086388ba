//! End-to-end exercises of the accessor, codec, and validator working
//! together over the fake backend, mirroring how a binding layer drives
//! the crate: inspect a file, serialize its ACL, edit the text, and write
//! it back.

use std::path::PathBuf;

use acl::entry::{CLASS_OBJ, GROUP_OBJ, OTHER_OBJ, USER, USER_OBJ};
use acl::{AclEntry, AclError, Target, ValidationKind};
use test_support::FakeBackend;

fn extended() -> Vec<AclEntry> {
    vec![
        AclEntry::new(USER_OBJ, 0, 0o6),
        AclEntry::new(GROUP_OBJ, 0, 0o4),
        AclEntry::new(OTHER_OBJ, 0, 0o4),
        AclEntry::new(CLASS_OBJ, 0, 0o7),
        AclEntry::new(USER, 1001, 0o7),
    ]
}

#[test]
fn extended_object_reports_count_text_and_entries_consistently() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/export/data/report");
    backend.install_path(&path, &extended());
    let target = Target::from(&path);

    assert_eq!(5, acl::count(&backend, target).expect("count"));
    assert!(!acl::is_trivial(&backend, target).expect("trivial"));

    let text = acl::read_text(&backend, target)
        .expect("read text")
        .expect("extended object has text");
    assert!(text.contains("user:1001:rwx"));

    let reparsed = acl::from_text(&backend, &text).expect("from_text");
    assert_eq!(extended(), reparsed);
}

#[test]
fn read_text_and_read_agree_on_trivial_objects() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/export/data/plain");
    backend.install_trivial(&path);
    let target = Target::from(&path);

    assert!(acl::is_trivial(&backend, target).expect("trivial"));
    assert!(acl::read(&backend, target).expect("read").is_none());
    assert!(acl::read_text(&backend, target).expect("read text").is_none());
}

#[test]
fn text_written_through_the_codec_survives_a_read_back() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/export/data/report");
    backend.install_trivial(&path);
    let target = Target::from(&path);

    let text = "user::rw-,user:1001:rwx,group::r--,mask:rwx,other:r--";
    acl::write_text(&backend, target, text).expect("write text");

    let entries = acl::read(&backend, target)
        .expect("read")
        .expect("written object is extended");
    assert_eq!(5, entries.len());
    assert_eq!(
        text,
        acl::to_text(&backend, &entries).expect("to_text")
    );
}

#[test]
fn duplicate_user_object_text_fails_validation_at_index_one() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/export/data/report");
    backend.install_trivial(&path);
    let target = Target::from(&path);

    let text = "user::rw-,user::r--,group::r--,mask:r--,other:r--";
    match acl::write_text(&backend, target, text) {
        Err(AclError::Validation(violation)) => {
            assert_eq!(ValidationKind::DuplicateUser, violation.kind());
            assert_eq!(Some(1), violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
    // The rejected write must leave the prior ACL in place.
    assert!(acl::is_trivial(&backend, target).expect("trivial"));
}

#[test]
fn validation_error_message_identifies_the_offending_entry() {
    let backend = FakeBackend::new();
    let path = PathBuf::from("/export/data/report");
    backend.install_trivial(&path);

    let text = "user::rw-,group::r--,mask:r--,mask:rw-,other:r--";
    let error = acl::write_text(&backend, Target::from(&path), text)
        .expect_err("duplicate mask entries");
    assert_eq!(
        "invalid ACL entry 3: multiple mask entries",
        error.to_string()
    );
}

#[test]
fn path_utilities_resolve_lexical_and_absolute_forms() {
    let backend = FakeBackend::new();

    assert_eq!(
        PathBuf::from("/a/c"),
        acl::resolve_lexical(&backend, std::path::Path::new("/a/./b/../c"))
            .expect("lexical")
    );
    assert_eq!(
        PathBuf::from("/x"),
        acl::resolve_lexical(&backend, std::path::Path::new("/../x")).expect("lexical")
    );

    let absolute = acl::resolve_absolute(&backend, std::path::Path::new("leaf"))
        .expect("absolute");
    assert!(absolute.is_absolute());
}
