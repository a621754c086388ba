#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! In-memory fake of the ACL syscall backend so the `acl` crate is fully
//! testable off-Solaris. [`FakeBackend`] keeps per-path and per-descriptor
//! entry tables and emulates the platform pieces the real backend reaches
//! through libsec: the `aclcheck(3SEC)` duplicate/missing detection and a
//! numeric-id rendition of the `acltotext(3SEC)` canonical text form.
//!
//! # Design
//!
//! The emulations cover the behavior the core crate observes, not the full
//! platform surface: the text codec prints numeric ids where the real
//! serializer would resolve user and group names, and the checker enforces
//! the access-side mandatory set without the default-set completeness
//! rules. Test hooks exist to misreport the entry count (provoking the
//! count/fetch consistency fault) and to fail the replace call with a
//! chosen errno.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io;
use std::os::fd::AsRawFd;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use acl::entry::{
    ACL_DEFAULT, AclEntry, CLASS_OBJ, DEF_CLASS_OBJ, DEF_GROUP, DEF_GROUP_OBJ, DEF_OTHER_OBJ,
    DEF_USER, DEF_USER_OBJ, GROUP, GROUP_OBJ, OTHER_OBJ, USER, USER_OBJ,
};
use acl::{AclCheck, AclEnt, Backend, Target};

/// Entries installed by [`FakeBackend::install_trivial`]: the mandatory
/// owning-user, owning-group, class, and other set of a `rw-r--r--` file.
const TRIVIAL: [AclEnt; 4] = [
    AclEnt {
        a_type: USER_OBJ,
        a_id: 0,
        a_perm: 0o6,
    },
    AclEnt {
        a_type: GROUP_OBJ,
        a_id: 0,
        a_perm: 0o4,
    },
    AclEnt {
        a_type: CLASS_OBJ,
        a_id: 0,
        a_perm: 0o4,
    },
    AclEnt {
        a_type: OTHER_OBJ,
        a_id: 0,
        a_perm: 0o4,
    },
];

#[derive(Clone, Hash, PartialEq, Eq)]
enum Key {
    Path(PathBuf),
    Fd(i32),
}

impl Key {
    fn for_target(target: Target<'_>) -> Self {
        match target {
            Target::Path(path) => Self::Path(path.to_path_buf()),
            Target::Fd(fd) => Self::Fd(fd.as_raw_fd()),
        }
    }
}

#[derive(Default)]
struct State {
    objects: HashMap<Key, Vec<AclEnt>>,
    forced_count: Option<usize>,
    replace_errno: Option<i32>,
    syscalls: usize,
}

/// In-memory [`Backend`] implementation for tests.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    /// Creates an empty fake with no registered objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` with the mandatory four-entry (trivial) ACL.
    pub fn install_trivial<P: AsRef<Path>>(&self, path: P) {
        self.state
            .lock()
            .expect("fake backend state poisoned")
            .objects
            .insert(Key::Path(path.as_ref().to_path_buf()), TRIVIAL.to_vec());
    }

    /// Registers `path` with `entries`, preserving their order.
    pub fn install_path<P: AsRef<Path>>(&self, path: P, entries: &[AclEntry]) {
        self.state
            .lock()
            .expect("fake backend state poisoned")
            .objects
            .insert(
                Key::Path(path.as_ref().to_path_buf()),
                entries.iter().copied().map(AclEnt::from).collect(),
            );
    }

    /// Registers the object behind `fd` with `entries`.
    pub fn install_fd<F: AsRawFd>(&self, fd: &F, entries: &[AclEntry]) {
        self.state
            .lock()
            .expect("fake backend state poisoned")
            .objects
            .insert(
                Key::Fd(fd.as_raw_fd()),
                entries.iter().copied().map(AclEnt::from).collect(),
            );
    }

    /// Makes every subsequent sizing query report `count` regardless of
    /// the stored entries, provoking the count/fetch consistency fault.
    pub fn force_count(&self, count: usize) {
        self.state
            .lock()
            .expect("fake backend state poisoned")
            .forced_count = Some(count);
    }

    /// Makes every subsequent replace call fail with `errno`.
    pub fn fail_replace(&self, errno: i32) {
        self.state
            .lock()
            .expect("fake backend state poisoned")
            .replace_errno = Some(errno);
    }

    /// Number of emulated syscalls issued so far. Lets tests assert that
    /// guarded failures never reached the backend.
    #[must_use]
    pub fn syscall_count(&self) -> usize {
        self.state
            .lock()
            .expect("fake backend state poisoned")
            .syscalls
    }

    fn lookup(&self, target: Target<'_>) -> io::Result<Vec<AclEnt>> {
        let mut state = self.state.lock().expect("fake backend state poisoned");
        state.syscalls += 1;
        state
            .objects
            .get(&Key::for_target(target))
            .cloned()
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENOENT))
    }
}

impl Backend for FakeBackend {
    fn count(&self, target: Target<'_>) -> io::Result<usize> {
        let stored = self.lookup(target)?.len();
        let forced = self
            .state
            .lock()
            .expect("fake backend state poisoned")
            .forced_count;
        Ok(forced.unwrap_or(stored))
    }

    fn fetch(&self, target: Target<'_>, _count: usize) -> io::Result<Vec<AclEnt>> {
        self.lookup(target)
    }

    fn replace(&self, target: Target<'_>, entries: &[AclEnt]) -> io::Result<()> {
        let mut state = self.state.lock().expect("fake backend state poisoned");
        state.syscalls += 1;
        if let Some(errno) = state.replace_errno {
            return Err(io::Error::from_raw_os_error(errno));
        }
        let key = Key::for_target(target);
        if !state.objects.contains_key(&key) {
            return Err(io::Error::from_raw_os_error(libc::ENOENT));
        }
        state.objects.insert(key, entries.to_vec());
        Ok(())
    }

    fn check(&self, entries: &[AclEnt]) -> AclCheck {
        aclcheck(entries)
    }

    fn to_text(&self, entries: &[AclEnt]) -> io::Result<String> {
        let mut segments = Vec::with_capacity(entries.len());
        for entry in entries {
            segments.push(
                render_entry(entry)
                    .ok_or_else(|| io::Error::from_raw_os_error(libc::EINVAL))?,
            );
        }
        Ok(segments.join(","))
    }

    fn from_text(&self, text: &str) -> io::Result<Option<Vec<AclEnt>>> {
        let mut entries = Vec::new();
        for segment in text.split(',') {
            match parse_entry(segment.trim()) {
                Some(entry) => entries.push(entry),
                None => return Ok(None),
            }
        }
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(entries))
    }

    fn resolve_lexical(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(lexical(path))
    }

    fn resolve_absolute(&self, path: &Path) -> io::Result<PathBuf> {
        if path.is_absolute() {
            return Ok(lexical(path));
        }
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Ok(lexical(&base.join(path)))
    }
}

/// Emulation of the `aclcheck(3SEC)` duplicate and missing-entry rules.
///
/// The reported index is always the second (later) occurrence of a
/// duplicated entry, matching the platform checker.
fn aclcheck(entries: &[AclEnt]) -> AclCheck {
    let mut seen_singleton: HashMap<i32, usize> = HashMap::new();
    let mut seen_named: HashSet<(i32, i32)> = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let which = index as i32;
        match entry.a_type {
            USER_OBJ | DEF_USER_OBJ => {
                if seen_singleton.insert(entry.a_type, index).is_some() {
                    return AclCheck::violation(AclCheck::USER_ERROR, which);
                }
            }
            GROUP_OBJ | DEF_GROUP_OBJ => {
                if seen_singleton.insert(entry.a_type, index).is_some() {
                    return AclCheck::violation(AclCheck::GRP_ERROR, which);
                }
            }
            OTHER_OBJ | DEF_OTHER_OBJ => {
                if seen_singleton.insert(entry.a_type, index).is_some() {
                    return AclCheck::violation(AclCheck::OTHER_ERROR, which);
                }
            }
            CLASS_OBJ | DEF_CLASS_OBJ => {
                if seen_singleton.insert(entry.a_type, index).is_some() {
                    return AclCheck::violation(AclCheck::CLASS_ERROR, which);
                }
            }
            USER | GROUP | DEF_USER | DEF_GROUP => {
                if !seen_named.insert((entry.a_type, entry.a_id)) {
                    return AclCheck::violation(AclCheck::DUPLICATE_ERROR, which);
                }
            }
            _ => return AclCheck::violation(AclCheck::ENTRY_ERROR, which),
        }
    }

    let mandatory = [USER_OBJ, GROUP_OBJ, CLASS_OBJ, OTHER_OBJ];
    if mandatory
        .iter()
        .any(|code| !seen_singleton.contains_key(code))
    {
        return AclCheck::violation(AclCheck::MISS_ERROR, -1);
    }
    AclCheck::ok()
}

fn perm_string(perm: i32) -> String {
    format!(
        "{}{}{}",
        if perm & 0o4 != 0 { 'r' } else { '-' },
        if perm & 0o2 != 0 { 'w' } else { '-' },
        if perm & 0o1 != 0 { 'x' } else { '-' }
    )
}

fn parse_perm(text: &str) -> Option<i32> {
    let mut chars = text.chars();
    let r = chars.next()?;
    let w = chars.next()?;
    let x = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let mut perm = 0;
    match r {
        'r' => perm |= 0o4,
        '-' => {}
        _ => return None,
    }
    match w {
        'w' => perm |= 0o2,
        '-' => {}
        _ => return None,
    }
    match x {
        'x' => perm |= 0o1,
        '-' => {}
        _ => return None,
    }
    Some(perm)
}

/// Renders one entry in the canonical comma-separated form, with numeric
/// ids where the platform serializer would print names.
fn render_entry(entry: &AclEnt) -> Option<String> {
    let perms = perm_string(entry.a_perm);
    let segment = match entry.a_type {
        USER_OBJ => format!("user::{perms}"),
        USER => format!("user:{}:{perms}", entry.a_id),
        GROUP_OBJ => format!("group::{perms}"),
        GROUP => format!("group:{}:{perms}", entry.a_id),
        CLASS_OBJ => format!("mask:{perms}"),
        OTHER_OBJ => format!("other:{perms}"),
        DEF_USER_OBJ => format!("default:user::{perms}"),
        DEF_USER => format!("default:user:{}:{perms}", entry.a_id),
        DEF_GROUP_OBJ => format!("default:group::{perms}"),
        DEF_GROUP => format!("default:group:{}:{perms}", entry.a_id),
        DEF_CLASS_OBJ => format!("default:mask:{perms}"),
        DEF_OTHER_OBJ => format!("default:other:{perms}"),
        _ => return None,
    };
    Some(segment)
}

fn parse_entry(segment: &str) -> Option<AclEnt> {
    let (default, rest) = match segment.strip_prefix("default:") {
        Some(rest) => (true, rest),
        None => (false, segment),
    };
    let fields: Vec<&str> = rest.split(':').collect();
    let (a_type, a_id, perms) = match fields.as_slice() {
        ["user", "", perms] => (USER_OBJ, 0, *perms),
        ["user", id, perms] => (USER, id.parse::<i32>().ok()?, *perms),
        ["group", "", perms] => (GROUP_OBJ, 0, *perms),
        ["group", id, perms] => (GROUP, id.parse::<i32>().ok()?, *perms),
        ["mask", perms] => (CLASS_OBJ, 0, *perms),
        ["other", perms] => (OTHER_OBJ, 0, *perms),
        _ => return None,
    };
    let a_type = if default { a_type | ACL_DEFAULT } else { a_type };
    Some(AclEnt {
        a_type,
        a_id,
        a_perm: parse_perm(perms)?,
    })
}

/// Pure lexical resolution: strips `.` components and folds `..` into the
/// preceding segment, collapsing leading `..` beyond the root to `/`.
fn lexical(path: &Path) -> PathBuf {
    let absolute = path.is_absolute();
    let mut kept: Vec<OsString> = Vec::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {}
            Component::CurDir => {}
            Component::ParentDir => {
                if kept.pop().is_none() && !absolute {
                    kept.push(OsString::from(".."));
                }
            }
            Component::Normal(segment) => kept.push(segment.to_os_string()),
        }
    }
    let mut resolved = if absolute {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    for segment in kept {
        resolved.push(segment);
    }
    if resolved.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        resolved
    }
}
