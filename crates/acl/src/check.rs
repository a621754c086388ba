//! # Overview
//!
//! The validator: runs the platform's ACL consistency checker over an
//! entry list and maps its numeric outcome into the structured
//! [`ValidationError`]. Consistency rules themselves live in the operating
//! system; this crate only transcribes the verdict.

use crate::backend::{AclEnt, Backend};
use crate::entry::AclEntry;
use crate::error::{AclError, ValidationError};

/// Runs the platform consistency checker over `entries`.
///
/// # Errors
///
/// Returns [`AclError::Validation`] carrying the violation kind and, where
/// the checker defines one, the zero-based index of the offending entry.
pub fn validate<B: Backend>(backend: &B, entries: &[AclEntry]) -> Result<(), AclError> {
    let raw: Vec<AclEnt> = entries.iter().copied().map(AclEnt::from).collect();
    match ValidationError::from_check(backend.check(&raw)) {
        None => Ok(()),
        Some(violation) => Err(violation.into()),
    }
}
