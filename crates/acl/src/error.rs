//! # Overview
//!
//! Error taxonomy for the ACL subsystem. Five families exist: OS-call
//! failures (the untouched [`io::Error`] plus the operation and target),
//! input-bound failures (a path longer than the platform limit, rejected
//! before any syscall), text-parse failures, validation failures (one of
//! the consistency checker's violation kinds plus the offending entry
//! index where the checker defines one), and the fatal consistency fault
//! raised when a fetch disagrees with its preceding count.
//!
//! # Errors
//!
//! Nothing here retries or swallows; every failure carries enough state
//! for a caller to decide what happened without re-running the operation.

use std::fmt;

use thiserror::Error;

use crate::backend::AclCheck;

/// Error produced by ACL and path-resolution operations.
#[derive(Debug, Error)]
pub enum AclError {
    /// A syscall against a specific target failed.
    #[error("failed to {context} for {target}: {source}")]
    Os {
        /// Operation being performed when the error occurred.
        context: &'static str,
        /// Rendered description of the target involved.
        target: String,
        /// Underlying error emitted by the operating system.
        source: std::io::Error,
    },

    /// A targetless platform transform failed.
    #[error("failed to {context}: {source}")]
    Sys {
        /// Operation being performed when the error occurred.
        context: &'static str,
        /// Underlying error emitted by the operating system.
        source: std::io::Error,
    },

    /// A path argument exceeds the maximum representable length. No
    /// syscall was attempted.
    #[error("path length exceeds limit of {0}")]
    PathTooLong(usize),

    /// The platform text transform reported the ACL text as unparseable.
    #[error("invalid ACL text")]
    InvalidText,

    /// The entries parsed but failed consistency checking.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A fetch returned a different number of entries than the preceding
    /// count reported. Concurrent external modification is the usual
    /// cause; the read is aborted rather than truncated or padded.
    #[error(
        "ACL entry count for {target} changed between count and fetch \
         (counted {counted}, fetched {fetched})"
    )]
    EntryCountMismatch {
        /// Rendered description of the target involved.
        target: String,
        /// Entry count reported by the sizing query.
        counted: usize,
        /// Number of entries the data query produced.
        fetched: usize,
    },
}

/// Violation reported by the platform ACL consistency checker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationKind {
    /// More than one owning-user (or default owning-user) entry.
    #[error("multiple user entries")]
    DuplicateUser,
    /// More than one owning-group (or default owning-group) entry.
    #[error("multiple group entries")]
    DuplicateGroup,
    /// More than one other entry.
    #[error("multiple other entries")]
    DuplicateOther,
    /// More than one class (mask) entry.
    #[error("multiple mask entries")]
    DuplicateMask,
    /// Two named-user or named-group entries share a type and identifier.
    #[error("multiple user or group entries")]
    DuplicateNamed,
    /// An entry carries an unrecognized type code.
    #[error("invalid entry type")]
    InvalidEntryType,
    /// The mandatory owning-user, owning-group, other, or class entry is
    /// absent.
    #[error("missing mandatory entries")]
    MissingEntries,
    /// The checker ran out of memory.
    #[error("out of memory during ACL check")]
    OutOfMemory,
    /// The checker reported a status this crate does not recognize.
    #[error("unrecognized ACL check status {0}")]
    Unrecognized(i32),
}

/// Structured consistency-check failure: the violation kind plus the
/// zero-based index of the offending entry where the checker defines one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationError {
    kind: ValidationKind,
    index: Option<usize>,
}

impl ValidationError {
    /// Creates a failure from a violation kind and optional entry index.
    #[must_use]
    pub const fn new(kind: ValidationKind, index: Option<usize>) -> Self {
        Self { kind, index }
    }

    /// Maps a raw checker outcome into a structured failure.
    ///
    /// Returns `None` when the outcome reports a clean list. Statuses that
    /// do not define an offending entry (missing entries, memory faults)
    /// yield `index() == None` regardless of the reported position.
    #[must_use]
    pub fn from_check(outcome: AclCheck) -> Option<Self> {
        let kind = match outcome.code {
            AclCheck::OK => return None,
            AclCheck::USER_ERROR => ValidationKind::DuplicateUser,
            AclCheck::GRP_ERROR => ValidationKind::DuplicateGroup,
            AclCheck::OTHER_ERROR => ValidationKind::DuplicateOther,
            AclCheck::CLASS_ERROR => ValidationKind::DuplicateMask,
            AclCheck::DUPLICATE_ERROR => ValidationKind::DuplicateNamed,
            AclCheck::ENTRY_ERROR => ValidationKind::InvalidEntryType,
            AclCheck::MISS_ERROR => ValidationKind::MissingEntries,
            AclCheck::MEM_ERROR => ValidationKind::OutOfMemory,
            other => ValidationKind::Unrecognized(other),
        };
        let index = match kind {
            ValidationKind::MissingEntries
            | ValidationKind::OutOfMemory
            | ValidationKind::Unrecognized(_) => None,
            _ if outcome.which >= 0 => Some(outcome.which as usize),
            _ => None,
        };
        Some(Self::new(kind, index))
    }

    /// Returns the violation kind.
    #[must_use]
    pub const fn kind(&self) -> ValidationKind {
        self.kind
    }

    /// Returns the zero-based index of the offending entry, when the
    /// checker reported one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "invalid ACL entry {index}: {}", self.kind),
            None => write!(f, "invalid ACL: {}", self.kind),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AclError {
    /// Builds the OS-failure variant from an operation context, a rendered
    /// target, and the untouched OS error.
    pub(crate) fn os(
        context: &'static str,
        target: impl fmt::Display,
        source: std::io::Error,
    ) -> Self {
        Self::Os {
            context,
            target: target.to_string(),
            source,
        }
    }

    /// Returns the underlying OS error when this failure wraps one.
    #[must_use]
    pub fn io_source(&self) -> Option<&std::io::Error> {
        match self {
            Self::Os { source, .. } | Self::Sys { source, .. } => Some(source),
            _ => None,
        }
    }
}
