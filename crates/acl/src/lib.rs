#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Draft-POSIX ACL inspection and mutation for Solaris/illumos filesystem
//! objects, plus two path-canonicalization utilities. The crate is a safe
//! transcription layer over the platform's `aclent_t` machinery: entries
//! are read, validated, serialized, and written exactly as the operating
//! system reports and accepts them. No permission semantics are
//! interpreted here; the OS ACL evaluation engine stays the sole
//! authority.
//!
//! # Design
//!
//! - [`entry`] holds the entry data model and the classification of raw
//!   type codes into semantic categories.
//! - [`backend`] defines the injected syscall capability ([`Backend`]) and
//!   the [`Target`] addressing scheme (path or borrowed descriptor), so
//!   every higher layer is testable against a fake implementation.
//! - The accessor operations ([`count`], [`read`], [`read_text`],
//!   [`write`], [`write_text`], [`is_trivial`]) drive the platform's
//!   two-phase count-then-fetch protocol and the validate-before-replace
//!   write path.
//! - [`validate`] maps the platform consistency checker's outcome into a
//!   structured [`ValidationError`]; [`to_text`] and [`from_text`] delegate
//!   to the platform's canonical text transforms.
//! - [`resolve_lexical`] and [`resolve_absolute`] wrap `resolvepath(2)`
//!   and `realpath(3)`.
//!
//! On Solaris and illumos, `sys::SystemBackend` provides the live
//! implementation over `acl(2)`/`facl(2)` and libsec.
//!
//! # Invariants
//!
//! - Entry lists are fresh per fetch, ordered exactly as the operating
//!   system returned them, and share no state with the kernel afterwards.
//! - Descriptors are borrowed for a single call, never retained, never
//!   closed.
//! - A fetch whose length disagrees with its preceding count is a fatal
//!   consistency fault, never a silent truncation and never retried.
//! - `write` validates before replacing; a rejected list leaves the prior
//!   ACL untouched.
//!
//! # Errors
//!
//! All operations return [`AclError`], which separates OS-call failures,
//! over-long path arguments, text-parse failures, structured validation
//! failures, and the count/fetch consistency fault. See [`error`].
//!
//! # Examples
//!
//! Read and rewrite an ACL through a fake backend (the system backend on
//! Solaris is a drop-in replacement):
//!
//! ```
//! use acl::entry::{CLASS_OBJ, GROUP_OBJ, OTHER_OBJ, USER, USER_OBJ};
//! use acl::{AclEntry, Target};
//! use std::path::Path;
//! use test_support::FakeBackend;
//!
//! # fn demo() -> Result<(), acl::AclError> {
//! let backend = FakeBackend::new();
//! let path = Path::new("/export/report");
//! backend.install_trivial(path);
//!
//! assert!(acl::is_trivial(&backend, Target::path(path))?);
//!
//! let entries = vec![
//!     AclEntry::new(USER_OBJ, 0, 0o6),
//!     AclEntry::new(USER, 1001, 0o7),
//!     AclEntry::new(GROUP_OBJ, 0, 0o4),
//!     AclEntry::new(CLASS_OBJ, 0, 0o7),
//!     AclEntry::new(OTHER_OBJ, 0, 0o4),
//! ];
//! acl::write(&backend, Target::path(path), &entries)?;
//!
//! let text = acl::read_text(&backend, Target::path(path))?
//!     .expect("extended object has text");
//! assert!(text.contains("user:1001:rwx"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod backend;
mod check;
pub mod entry;
pub mod error;
mod file;
mod resolve;
/// Live syscall backend; compiled only on Solaris and illumos.
pub mod sys;
mod text;

pub use backend::{AclCheck, AclEnt, Backend, Target};
pub use check::validate;
pub use entry::{AclEntry, AclEntryKind, MIN_ACL_ENTRIES};
pub use error::{AclError, ValidationError, ValidationKind};
pub use file::{count, is_trivial, read, read_text, write, write_text};
pub use resolve::{resolve_absolute, resolve_lexical};
pub use text::{from_text, to_text};

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
pub use sys::SystemBackend;
