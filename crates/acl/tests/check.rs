//! Tests for the validator, driven through the fake backend's checker.

use acl::entry::{CLASS_OBJ, GROUP, GROUP_OBJ, OTHER_OBJ, USER_OBJ};
use acl::{AclEntry, AclError, ValidationKind, validate};
use test_support::FakeBackend;

fn mandatory() -> Vec<AclEntry> {
    vec![
        AclEntry::new(USER_OBJ, 0, 0o6),
        AclEntry::new(GROUP_OBJ, 0, 0o4),
        AclEntry::new(CLASS_OBJ, 0, 0o4),
        AclEntry::new(OTHER_OBJ, 0, 0o4),
    ]
}

#[test]
fn a_complete_mandatory_set_passes() {
    let backend = FakeBackend::new();
    validate(&backend, &mandatory()).expect("mandatory set is consistent");
}

#[test]
fn duplicate_mask_reports_the_second_occurrence() {
    let backend = FakeBackend::new();
    let mut entries = mandatory();
    entries.push(AclEntry::new(CLASS_OBJ, 0, 0o7));

    let error = validate(&backend, &entries).expect_err("duplicate mask");
    match error {
        AclError::Validation(violation) => {
            assert_eq!(ValidationKind::DuplicateMask, violation.kind());
            assert_eq!(Some(4), violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn duplicate_owning_user_reports_index_one() {
    let backend = FakeBackend::new();
    let entries = vec![
        AclEntry::new(USER_OBJ, 0, 0o6),
        AclEntry::new(USER_OBJ, 0, 0o7),
        AclEntry::new(GROUP_OBJ, 0, 0o4),
        AclEntry::new(CLASS_OBJ, 0, 0o4),
        AclEntry::new(OTHER_OBJ, 0, 0o4),
    ];

    let error = validate(&backend, &entries).expect_err("duplicate user");
    match error {
        AclError::Validation(violation) => {
            assert_eq!(ValidationKind::DuplicateUser, violation.kind());
            assert_eq!(Some(1), violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn duplicate_named_entries_report_the_named_kind() {
    let backend = FakeBackend::new();
    let mut entries = mandatory();
    entries.insert(1, AclEntry::new(GROUP, 10, 0o4));
    entries.insert(2, AclEntry::new(GROUP, 10, 0o5));

    let error = validate(&backend, &entries).expect_err("duplicate named group");
    match error {
        AclError::Validation(violation) => {
            assert_eq!(ValidationKind::DuplicateNamed, violation.kind());
            assert_eq!(Some(2), violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn missing_mandatory_entries_carry_no_index() {
    let backend = FakeBackend::new();
    let entries = vec![AclEntry::new(USER_OBJ, 0, 0o6)];

    let error = validate(&backend, &entries).expect_err("incomplete set");
    match error {
        AclError::Validation(violation) => {
            assert_eq!(ValidationKind::MissingEntries, violation.kind());
            assert_eq!(None, violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn unrecognized_type_codes_fail_the_entry_check() {
    let backend = FakeBackend::new();
    let mut entries = mandatory();
    entries.push(AclEntry::new(0x4000, 0, 0o4));

    let error = validate(&backend, &entries).expect_err("bogus type code");
    match error {
        AclError::Validation(violation) => {
            assert_eq!(ValidationKind::InvalidEntryType, violation.kind());
            assert_eq!(Some(4), violation.index());
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }
}
