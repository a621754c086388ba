//! # Overview
//!
//! Text codec entry points. Serialization and parsing both delegate to the
//! platform's own transforms rather than reinventing the canonical form:
//! third-party tools consuming the text expect platform-native syntax, and
//! the platform is the authority on what it accepts back.
//!
//! # Errors
//!
//! A parse rejection is reported as [`AclError::InvalidText`], a dedicated
//! error distinct from both OS failures and later validation failures.

use crate::backend::{AclEnt, Backend};
use crate::entry::AclEntry;
use crate::error::AclError;

/// Serializes `entries` to the platform's canonical human-readable form.
///
/// Entry order is preserved verbatim; the output is whatever the platform
/// serializer defines, not a form invented by this crate.
///
/// # Errors
///
/// Returns [`AclError::Sys`] when the platform serializer fails.
pub fn to_text<B: Backend>(backend: &B, entries: &[AclEntry]) -> Result<String, AclError> {
    let raw: Vec<AclEnt> = entries.iter().copied().map(AclEnt::from).collect();
    backend.to_text(&raw).map_err(|error| AclError::Sys {
        context: "convert ACL to text",
        source: error,
    })
}

/// Parses canonical human-readable ACL text into an entry list.
///
/// # Errors
///
/// Returns [`AclError::InvalidText`] when the platform transform reports
/// the text as unparseable, or [`AclError::Sys`] for OS-level failures.
pub fn from_text<B: Backend>(backend: &B, text: &str) -> Result<Vec<AclEntry>, AclError> {
    let parsed = backend.from_text(text).map_err(|error| AclError::Sys {
        context: "parse ACL text",
        source: error,
    })?;
    match parsed {
        Some(raw) => Ok(raw.into_iter().map(AclEntry::from).collect()),
        None => Err(AclError::InvalidText),
    }
}
