//! # Overview
//!
//! Per-target accessor operations: count, read, read-as-text, write,
//! write-from-text, and the triviality check. Every operation is generic
//! over the injected [`Backend`] and addresses its object through a
//! [`Target`], so the same code path serves both path-keyed and
//! descriptor-keyed callers.
//!
//! # Design
//!
//! Reads follow the platform's two-phase protocol: a sizing query
//! (`GETACLCNT`), then a data query (`GETACL`) into a buffer allocated for
//! exactly the reported count. The two queries are not atomic with respect
//! to concurrent external modification; a fetched length that disagrees
//! with the count is surfaced as [`AclError::EntryCountMismatch`] and never
//! silently truncated, padded, or retried.
//!
//! [`count`] reports the operating system's figure verbatim, while
//! [`read`] and [`is_trivial`] compare it against [`MIN_ACL_ENTRIES`].
//! The asymmetry is deliberate: callers wanting the extended-entry count
//! must check against the constant themselves.
//!
//! # Errors
//!
//! Path arguments longer than the platform limit fail with
//! [`AclError::PathTooLong`] before any syscall is attempted, matching the
//! fixed-size path buffers of the platform interfaces. All other failures
//! carry the untouched OS error.

use tracing::trace;

use crate::backend::{AclEnt, Backend, Target};
use crate::check::validate;
use crate::entry::{AclEntry, MIN_ACL_ENTRIES};
use crate::error::AclError;
use crate::text;

/// Maximum path length accepted before an operation is attempted.
const PATH_LIMIT: usize = libc::PATH_MAX as usize;

/// Rejects path targets the platform's fixed-size path buffers cannot hold.
fn guard_path(target: Target<'_>) -> Result<(), AclError> {
    if let Target::Path(path) = target
        && path.as_os_str().len() >= PATH_LIMIT
    {
        return Err(AclError::PathTooLong(PATH_LIMIT));
    }
    Ok(())
}

/// Returns the number of ACL entries on `target`, exactly as the operating
/// system reports it.
///
/// A trivial object reports [`MIN_ACL_ENTRIES`], not zero; callers wanting
/// the extended-entry count must compare against the constant themselves.
///
/// # Errors
///
/// Returns [`AclError::PathTooLong`] for over-long path targets and
/// [`AclError::Os`] when the sizing query fails.
pub fn count<B: Backend>(backend: &B, target: Target<'_>) -> Result<usize, AclError> {
    guard_path(target)?;
    let counted = backend
        .count(target)
        .map_err(|error| AclError::os("query ACL entry count", target, error))?;
    trace!("counted {counted} ACL entries for {target}");
    Ok(counted)
}

/// Reads the ACL on `target`.
///
/// Returns `Ok(None)` when the object is trivial, without allocating a
/// fetch buffer. Otherwise the entries arrive in the order the operating
/// system returned them, converted through the entry model.
///
/// # Errors
///
/// Returns [`AclError::EntryCountMismatch`] when the data query produces a
/// different number of entries than the sizing query reported, which can
/// happen when the ACL is modified concurrently. The read is aborted; the
/// caller decides whether to re-issue it.
pub fn read<B: Backend>(
    backend: &B,
    target: Target<'_>,
) -> Result<Option<Vec<AclEntry>>, AclError> {
    let raw = read_raw(backend, target)?;
    Ok(raw.map(|entries| entries.into_iter().map(AclEntry::from).collect()))
}

/// Reads the ACL on `target` and serializes it to the platform's canonical
/// human-readable form.
///
/// Returns `Ok(None)` when the object is trivial.
///
/// # Errors
///
/// As [`read`], plus [`AclError::Sys`] when the platform serializer fails.
pub fn read_text<B: Backend>(
    backend: &B,
    target: Target<'_>,
) -> Result<Option<String>, AclError> {
    match read_raw(backend, target)? {
        None => Ok(None),
        Some(raw) => {
            let rendered = backend
                .to_text(&raw)
                .map_err(|error| AclError::Sys {
                    context: "convert ACL to text",
                    source: error,
                })?;
            Ok(Some(rendered))
        }
    }
}

/// Replaces the ACL on `target` with `entries`.
///
/// The list is run through the platform consistency checker first; the
/// replace syscall is only issued when the checker passes, so a rejected
/// list leaves the prior ACL untouched.
///
/// # Errors
///
/// Returns [`AclError::Validation`] with the violation kind and offending
/// index when the checker rejects the list, or [`AclError::Os`] when the
/// operating system refuses the replace call.
pub fn write<B: Backend>(
    backend: &B,
    target: Target<'_>,
    entries: &[AclEntry],
) -> Result<(), AclError> {
    guard_path(target)?;
    validate(backend, entries)?;
    let raw: Vec<AclEnt> = entries.iter().copied().map(AclEnt::from).collect();
    backend
        .replace(target, &raw)
        .map_err(|error| AclError::os("replace ACL", target, error))?;
    trace!("replaced ACL on {target} with {} entries", entries.len());
    Ok(())
}

/// Parses `text` through the platform transform and replaces the ACL on
/// `target` with the result.
///
/// # Errors
///
/// Returns [`AclError::InvalidText`] when the text fails the platform
/// parse, [`AclError::Validation`] when the parsed entries fail
/// consistency checking, or [`AclError::Os`] when the replace call is
/// rejected. Parse and validation failures are distinct: text can parse
/// cleanly and still describe an inconsistent list.
pub fn write_text<B: Backend>(
    backend: &B,
    target: Target<'_>,
    text: &str,
) -> Result<(), AclError> {
    guard_path(target)?;
    let entries = text::from_text(backend, text)?;
    write(backend, target, &entries)
}

/// Returns `true` when `target` carries only the mandatory entries.
///
/// # Errors
///
/// As [`count`].
pub fn is_trivial<B: Backend>(backend: &B, target: Target<'_>) -> Result<bool, AclError> {
    Ok(count(backend, target)? == MIN_ACL_ENTRIES)
}

/// Two-phase count-then-fetch shared by [`read`] and [`read_text`].
fn read_raw<B: Backend>(
    backend: &B,
    target: Target<'_>,
) -> Result<Option<Vec<AclEnt>>, AclError> {
    let counted = count(backend, target)?;
    if counted == MIN_ACL_ENTRIES {
        return Ok(None);
    }

    let fetched = backend
        .fetch(target, counted)
        .map_err(|error| AclError::os("fetch ACL entries", target, error))?;
    if fetched.len() != counted {
        return Err(AclError::EntryCountMismatch {
            target: target.to_string(),
            counted,
            fetched: fetched.len(),
        });
    }
    trace!("fetched {counted} ACL entries for {target}");
    Ok(Some(fetched))
}

