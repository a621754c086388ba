//! # Overview
//!
//! Path canonicalization utilities, peripheral to the ACL core. Both
//! variants resolve symbolic links through the operating system; the
//! lexical variant additionally removes `.` components and non-leading
//! `..` components together with their preceding segment, collapsing
//! leading `..` beyond the root to `/`. The absolute variant guarantees an
//! absolute result.

use crate::backend::{Backend, Target};
use crate::error::AclError;
use std::path::{Path, PathBuf};

/// Resolves symbolic links and lexical components of `path`.
///
/// `.` components are removed, as are non-leading `..` components and the
/// segment preceding them; leading `..` components that resolve past the
/// root are replaced by `/`. The result is not forced to be absolute.
///
/// # Errors
///
/// Returns [`AclError::PathTooLong`] for over-long paths and
/// [`AclError::Os`] when any component is unreadable.
pub fn resolve_lexical<B: Backend>(backend: &B, path: &Path) -> Result<PathBuf, AclError> {
    guard(path)?;
    backend
        .resolve_lexical(path)
        .map_err(|error| AclError::os("resolve path", Target::Path(path), error))
}

/// Resolves `path` to an absolute canonical path.
///
/// Identical to [`resolve_lexical`] except that the result is guaranteed
/// to be absolute where the operating system can produce one.
///
/// # Errors
///
/// As [`resolve_lexical`].
pub fn resolve_absolute<B: Backend>(backend: &B, path: &Path) -> Result<PathBuf, AclError> {
    guard(path)?;
    backend
        .resolve_absolute(path)
        .map_err(|error| AclError::os("resolve absolute path", Target::Path(path), error))
}

fn guard(path: &Path) -> Result<(), AclError> {
    let limit = libc::PATH_MAX as usize;
    if path.as_os_str().len() >= limit {
        return Err(AclError::PathTooLong(limit));
    }
    Ok(())
}

