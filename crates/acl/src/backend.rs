//! # Overview
//!
//! The operating-system capability boundary. Every ACL and path-resolution
//! syscall this crate depends on is reached through the [`Backend`] trait so
//! the accessor, codec, and validator layers can be exercised against a fake
//! implementation off-platform. The real implementation lives in
//! [`crate::sys`] and is compiled only on Solaris and illumos.
//!
//! # Design
//!
//! The trait mirrors the platform API surface one-to-one: the `acl(2)` /
//! `facl(2)` opcodes (`GETACLCNT`, `GETACL`, `SETACL`) become [`count`],
//! [`fetch`], and [`replace`]; the libsec transforms become [`check`],
//! [`to_text`], and [`from_text`]; the symlink-resolution calls become
//! [`resolve_lexical`] and [`resolve_absolute`]. Methods exchange the raw
//! [`AclEnt`] record, leaving semantic conversion to the entry model.
//!
//! [`count`]: Backend::count
//! [`fetch`]: Backend::fetch
//! [`replace`]: Backend::replace
//! [`check`]: Backend::check
//! [`to_text`]: Backend::to_text
//! [`from_text`]: Backend::from_text
//! [`resolve_lexical`]: Backend::resolve_lexical
//! [`resolve_absolute`]: Backend::resolve_absolute

use std::fmt;
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::{Path, PathBuf};

/// Raw ACL entry with the same layout as the platform `aclent_t`: three
/// C `int` fields.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AclEnt {
    /// Entry type code (`USER_OBJ`, `USER`, ...).
    pub a_type: i32,
    /// User or group identifier; ignored by the OS for types that do not
    /// carry one.
    pub a_id: i32,
    /// Permission bitmask.
    pub a_perm: i32,
}

/// Outcome of the platform ACL consistency checker.
///
/// `code` is the checker's numeric status and `which` the index of the
/// offending entry when the status defines one (`-1` otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AclCheck {
    /// Numeric status returned by the checker; zero means the list passed.
    pub code: i32,
    /// Index of the offending entry, or a negative value when the status
    /// carries no index.
    pub which: i32,
}

impl AclCheck {
    /// Status for a list that passed every consistency rule.
    pub const OK: i32 = 0;
    /// Multiple owning-group or default owning-group entries.
    pub const GRP_ERROR: i32 = 1;
    /// Multiple owning-user or default owning-user entries.
    pub const USER_ERROR: i32 = 2;
    /// Multiple other entries.
    pub const OTHER_ERROR: i32 = 3;
    /// Multiple class (mask) entries.
    pub const CLASS_ERROR: i32 = 4;
    /// Duplicate named-user or named-group entries.
    pub const DUPLICATE_ERROR: i32 = 5;
    /// Mandatory entries are missing from the list.
    pub const MISS_ERROR: i32 = 6;
    /// The checker could not allocate working memory.
    pub const MEM_ERROR: i32 = 7;
    /// An entry carries an unrecognized type code.
    pub const ENTRY_ERROR: i32 = 8;

    /// Outcome reporting a clean list.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            code: Self::OK,
            which: -1,
        }
    }

    /// Outcome reporting `code` against the entry at `which`.
    #[must_use]
    pub const fn violation(code: i32, which: i32) -> Self {
        Self { code, which }
    }

    /// Returns `true` when the checker reported no violation.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.code == Self::OK
    }
}

/// Filesystem object an ACL operation acts on.
///
/// Paths are resolved by the operating system at call time and never
/// cached. Descriptors are borrowed for the duration of a single call; the
/// crate never closes a descriptor it did not open and never retains one
/// across calls.
#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    /// Object addressed by filesystem path.
    Path(&'a Path),
    /// Object addressed by an already-open descriptor.
    Fd(BorrowedFd<'a>),
}

impl<'a> Target<'a> {
    /// Targets the object at `path`.
    #[must_use]
    pub fn path<P: AsRef<Path> + ?Sized>(path: &'a P) -> Self {
        Self::Path(path.as_ref())
    }

    /// Targets the object behind the borrowed descriptor.
    #[must_use]
    pub const fn fd(fd: BorrowedFd<'a>) -> Self {
        Self::Fd(fd)
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "'{}'", path.display()),
            Self::Fd(fd) => write!(f, "descriptor {}", fd.as_raw_fd()),
        }
    }
}

impl<'a> From<&'a Path> for Target<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Target<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::Path(path.as_path())
    }
}

impl<'a> From<BorrowedFd<'a>> for Target<'a> {
    fn from(fd: BorrowedFd<'a>) -> Self {
        Self::Fd(fd)
    }
}

/// Syscall family the ACL subsystem is built on.
///
/// Implementations must not retain state between calls beyond what the
/// operating system itself holds; the accessor layer treats every method as
/// one synchronous syscall sequence.
pub trait Backend {
    /// Reports the number of ACL entries on `target`, verbatim.
    fn count(&self, target: Target<'_>) -> io::Result<usize>;

    /// Fetches the entries on `target` into a buffer sized for `count`
    /// entries. The returned vector holds exactly as many entries as the
    /// operating system produced, which the caller must compare against
    /// `count`.
    fn fetch(&self, target: Target<'_>, count: usize) -> io::Result<Vec<AclEnt>>;

    /// Replaces the ACL on `target` with `entries`, preserving order.
    fn replace(&self, target: Target<'_>, entries: &[AclEnt]) -> io::Result<()>;

    /// Runs the platform consistency checker over `entries`.
    fn check(&self, entries: &[AclEnt]) -> AclCheck;

    /// Serializes `entries` to the platform's canonical human-readable form.
    fn to_text(&self, entries: &[AclEnt]) -> io::Result<String>;

    /// Parses canonical human-readable text into raw entries. Returns
    /// `Ok(None)` when the platform transform reports the text as
    /// unparseable, which is distinct from an OS failure.
    fn from_text(&self, text: &str) -> io::Result<Option<Vec<AclEnt>>>;

    /// Resolves symlinks and lexical components of `path` without forcing
    /// an absolute result.
    fn resolve_lexical(&self, path: &Path) -> io::Result<PathBuf>;

    /// Resolves `path` to an absolute canonical path.
    fn resolve_absolute(&self, path: &Path) -> io::Result<PathBuf>;
}
