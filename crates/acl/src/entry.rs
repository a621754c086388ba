//! # Overview
//!
//! In-memory representation of a single draft-POSIX ACL entry together with
//! the classification of raw `aclent_t` type codes into semantic categories.
//! This module is the only place meaning is attached to the platform's
//! numeric ACL constants, so the tables here must stay in exact lockstep
//! with `<sys/acl.h>`.
//!
//! # Design
//!
//! [`AclEntry`] keeps the raw type code it was constructed with rather than
//! collapsing it to an [`AclEntryKind`] eagerly. The platform distinguishes
//! the owning-user entry (`USER_OBJ`) from named-user entries (`USER`) even
//! though both classify as [`AclEntryKind::User`]; preserving the code makes
//! writing an entry list back to the operating system lossless.
//!
//! # Invariants
//!
//! - Entries are immutable value records once constructed.
//! - [`AclEntryKind::classify`] is total: unrecognized codes map to
//!   [`AclEntryKind::Unknown`], never to an error.

use std::fmt;

use crate::backend::AclEnt;

/// Owning-user entry type code.
pub const USER_OBJ: i32 = 0x01;
/// Named-user entry type code.
pub const USER: i32 = 0x02;
/// Owning-group entry type code.
pub const GROUP_OBJ: i32 = 0x04;
/// Named-group entry type code.
pub const GROUP: i32 = 0x08;
/// Class (mask) entry type code.
pub const CLASS_OBJ: i32 = 0x10;
/// Other entry type code.
pub const OTHER_OBJ: i32 = 0x20;
/// Flag bit marking an entry as part of a directory's default ACL.
pub const ACL_DEFAULT: i32 = 0x1000;
/// Default owning-user entry type code.
pub const DEF_USER_OBJ: i32 = ACL_DEFAULT | USER_OBJ;
/// Default named-user entry type code.
pub const DEF_USER: i32 = ACL_DEFAULT | USER;
/// Default owning-group entry type code.
pub const DEF_GROUP_OBJ: i32 = ACL_DEFAULT | GROUP_OBJ;
/// Default named-group entry type code.
pub const DEF_GROUP: i32 = ACL_DEFAULT | GROUP;
/// Default class (mask) entry type code.
pub const DEF_CLASS_OBJ: i32 = ACL_DEFAULT | CLASS_OBJ;
/// Default other entry type code.
pub const DEF_OTHER_OBJ: i32 = ACL_DEFAULT | OTHER_OBJ;

/// Number of entries present on an object with no extended ACL: owning
/// user, owning group, other, and the class entry.
///
/// This is a fixed platform constant, not a computed value. `GETACLCNT`
/// reporting exactly this many entries is what makes a file trivial.
pub const MIN_ACL_ENTRIES: usize = 4;

/// Semantic category of an ACL entry.
///
/// The mapping from raw type codes is many-to-one: the platform's
/// named-user and owning-user codes both classify as [`AclEntryKind::User`],
/// and likewise for groups and their default counterparts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AclEntryKind {
    /// Owning user or a named user.
    User,
    /// Owning group or a named group.
    Group,
    /// The other (world) entry.
    Other,
    /// The class entry capping effective permissions.
    Mask,
    /// Default-ACL owning user or named user.
    DefaultUser,
    /// Default-ACL owning group or named group.
    DefaultGroup,
    /// Default-ACL other entry.
    DefaultOther,
    /// Default-ACL class entry.
    DefaultMask,
    /// Any type code the platform tables do not recognize.
    Unknown,
}

impl AclEntryKind {
    /// Classifies a raw `aclent_t` type code.
    ///
    /// Total over all inputs; unrecognized codes yield
    /// [`AclEntryKind::Unknown`].
    #[must_use]
    pub const fn classify(code: i32) -> Self {
        match code {
            USER | USER_OBJ => Self::User,
            GROUP | GROUP_OBJ => Self::Group,
            OTHER_OBJ => Self::Other,
            CLASS_OBJ => Self::Mask,
            DEF_USER | DEF_USER_OBJ => Self::DefaultUser,
            DEF_GROUP | DEF_GROUP_OBJ => Self::DefaultGroup,
            DEF_OTHER_OBJ => Self::DefaultOther,
            DEF_CLASS_OBJ => Self::DefaultMask,
            _ => Self::Unknown,
        }
    }

    /// Returns the category name used by the platform's human-readable
    /// representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Other => "other",
            Self::Mask => "mask",
            Self::DefaultUser => "defaultuser",
            Self::DefaultGroup => "defaultgroup",
            Self::DefaultOther => "defaultother",
            Self::DefaultMask => "defaultmask",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AclEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One access-control entry: raw type code, identifier, and permission bits.
///
/// The identifier is meaningful only for named-user and named-group codes
/// ([`USER`], [`GROUP`], [`DEF_USER`], [`DEF_GROUP`]); the operating system
/// ignores it for every other type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AclEntry {
    type_code: i32,
    id: i32,
    perm: i32,
}

impl AclEntry {
    /// Creates an entry from a raw type code, identifier, and permission
    /// bitmask.
    #[must_use]
    pub const fn new(type_code: i32, id: i32, perm: i32) -> Self {
        Self {
            type_code,
            id,
            perm,
        }
    }

    /// Returns the raw `aclent_t` type code, preserved verbatim.
    #[must_use]
    pub const fn type_code(&self) -> i32 {
        self.type_code
    }

    /// Returns the semantic category derived from the type code.
    #[must_use]
    pub const fn kind(&self) -> AclEntryKind {
        AclEntryKind::classify(self.type_code)
    }

    /// Returns the user or group identifier.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Returns the permission bitmask granted by this entry.
    #[must_use]
    pub const fn perm(&self) -> i32 {
        self.perm
    }

    /// Returns `true` when the type code is one that carries an identifier.
    #[must_use]
    pub const fn carries_id(&self) -> bool {
        matches!(self.type_code, USER | GROUP | DEF_USER | DEF_GROUP)
    }
}

impl From<AclEnt> for AclEntry {
    fn from(raw: AclEnt) -> Self {
        Self::new(raw.a_type, raw.a_id, raw.a_perm)
    }
}

impl From<AclEntry> for AclEnt {
    fn from(entry: AclEntry) -> Self {
        Self {
            a_type: entry.type_code,
            a_id: entry.id,
            a_perm: entry.perm,
        }
    }
}
