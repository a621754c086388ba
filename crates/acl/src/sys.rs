#![cfg(any(target_os = "solaris", target_os = "illumos"))]
#![allow(unsafe_code)]

//! # Overview
//!
//! The real [`Backend`] implementation, built on the Solaris/illumos ACL
//! syscall family: `acl(2)` / `facl(2)` with the `GETACLCNT`, `GETACL`,
//! and `SETACL` opcodes, the libsec transforms `aclcheck(3SEC)`,
//! `acltotext(3SEC)`, and `aclfromtext(3SEC)`, and the path-resolution
//! calls `resolvepath(2)` and `realpath(3)`.
//!
//! # Design
//!
//! `aclent_t` has the same layout as [`AclEnt`], so fetch buffers are
//! plain `Vec<AclEnt>` handed to the kernel directly and released by RAII
//! on every exit path. Strings returned by libsec are allocated with
//! `malloc(3)`; they are copied into owned Rust values and `free(3)`d
//! before the call returns, including when conversion fails.
//!
//! # Errors
//!
//! Syscall failures surface as [`io::Error::last_os_error`], untouched.
//! `aclfromtext` reports unparseable text by returning a null pointer
//! without a reliable errno, which this backend maps to `Ok(None)` so the
//! accessor layer can raise its dedicated parse error.

use std::ffi::{CStr, CString, OsString};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use std::ptr;

use crate::backend::{AclCheck, AclEnt, Backend, Target};

mod ffi {
    #![allow(unsafe_code)]

    use libc::{c_char, c_int, size_t, ssize_t};

    use crate::backend::AclEnt;

    /// `acl(2)` opcode: fetch entries.
    pub const GETACL: c_int = 1;
    /// `acl(2)` opcode: replace entries.
    pub const SETACL: c_int = 2;
    /// `acl(2)` opcode: count entries.
    pub const GETACLCNT: c_int = 3;

    unsafe extern "C" {
        pub fn acl(pathp: *const c_char, cmd: c_int, nentries: c_int, aclbufp: *mut AclEnt)
        -> c_int;
        pub fn facl(fd: c_int, cmd: c_int, nentries: c_int, aclbufp: *mut AclEnt) -> c_int;
        pub fn resolvepath(path: *const c_char, buf: *mut c_char, bufsiz: size_t) -> ssize_t;
        pub fn realpath(path: *const c_char, resolved: *mut c_char) -> *mut c_char;
    }

    #[link(name = "sec")]
    unsafe extern "C" {
        pub fn aclcheck(aclbufp: *mut AclEnt, nentries: c_int, which: *mut c_int) -> c_int;
        pub fn acltotext(aclbufp: *mut AclEnt, nentries: c_int) -> *mut c_char;
        pub fn aclfromtext(acltextp: *const c_char, aclcnt: *mut c_int) -> *mut AclEnt;
    }
}

/// Backend backed by the live operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemBackend;

impl SystemBackend {
    /// Creates the system backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn c_path(path: &Path) -> io::Result<CString> {
    Ok(CString::new(path.as_os_str().as_bytes())?)
}

/// Issues one `acl(2)`/`facl(2)` call against `target`.
fn acl_call(target: Target<'_>, cmd: libc::c_int, buf: &mut [AclEnt]) -> io::Result<usize> {
    let nentries = libc::c_int::try_from(buf.len())
        .map_err(|_| io::Error::from_raw_os_error(libc::EINVAL))?;
    let bufp = if buf.is_empty() {
        ptr::null_mut()
    } else {
        buf.as_mut_ptr()
    };
    let rv = match target {
        Target::Path(path) => {
            let path = c_path(path)?;
            // Safety: the path pointer is valid for the duration of the call
            // and the buffer holds at least `nentries` entries.
            unsafe { ffi::acl(path.as_ptr(), cmd, nentries, bufp) }
        }
        // Safety: the descriptor is borrowed from the caller and stays open
        // for the duration of the call.
        Target::Fd(fd) => unsafe { ffi::facl(fd.as_raw_fd(), cmd, nentries, bufp) },
    };
    if rv < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rv as usize)
    }
}

impl Backend for SystemBackend {
    fn count(&self, target: Target<'_>) -> io::Result<usize> {
        acl_call(target, ffi::GETACLCNT, &mut [])
    }

    fn fetch(&self, target: Target<'_>, count: usize) -> io::Result<Vec<AclEnt>> {
        let mut buf = vec![AclEnt::default(); count];
        let fetched = acl_call(target, ffi::GETACL, &mut buf)?;
        buf.truncate(fetched);
        Ok(buf)
    }

    fn replace(&self, target: Target<'_>, entries: &[AclEnt]) -> io::Result<()> {
        // SETACL reads the buffer without modifying it, but the opcode
        // shares the mutable-buffer prototype with GETACL.
        let mut buf = entries.to_vec();
        acl_call(target, ffi::SETACL, &mut buf)?;
        Ok(())
    }

    fn check(&self, entries: &[AclEnt]) -> AclCheck {
        let mut buf = entries.to_vec();
        let mut which: libc::c_int = -1;
        let nentries = match libc::c_int::try_from(buf.len()) {
            Ok(value) => value,
            Err(_) => return AclCheck::violation(AclCheck::MEM_ERROR, -1),
        };
        // Safety: the buffer and the out-parameter are valid for the call.
        let code = unsafe { ffi::aclcheck(buf.as_mut_ptr(), nentries, &mut which) };
        AclCheck { code, which }
    }

    fn to_text(&self, entries: &[AclEnt]) -> io::Result<String> {
        let mut buf = entries.to_vec();
        let nentries = libc::c_int::try_from(buf.len())
            .map_err(|_| io::Error::from_raw_os_error(libc::EINVAL))?;
        // Safety: the buffer holds `nentries` entries for the duration of
        // the call.
        let text = unsafe { ffi::acltotext(buf.as_mut_ptr(), nentries) };
        if text.is_null() {
            return Err(io::Error::last_os_error());
        }
        // Safety: libsec returns a nul-terminated malloc'd string.
        let rendered = unsafe { CStr::from_ptr(text) }
            .to_string_lossy()
            .into_owned();
        // Safety: the pointer originates from malloc inside libsec.
        unsafe { libc::free(text.cast()) };
        Ok(rendered)
    }

    fn from_text(&self, text: &str) -> io::Result<Option<Vec<AclEnt>>> {
        let text = CString::new(text)?;
        let mut aclcnt: libc::c_int = 0;
        // Safety: the text pointer is valid for the duration of the call.
        let entries = unsafe { ffi::aclfromtext(text.as_ptr(), &mut aclcnt) };
        if entries.is_null() {
            // libsec reports unparseable text this way, without errno.
            return Ok(None);
        }
        let count = aclcnt.max(0) as usize;
        // Safety: libsec returns a malloc'd array of `aclcnt` entries.
        let parsed = unsafe { std::slice::from_raw_parts(entries, count) }.to_vec();
        // Safety: the pointer originates from malloc inside libsec.
        unsafe { libc::free(entries.cast()) };
        Ok(Some(parsed))
    }

    fn resolve_lexical(&self, path: &Path) -> io::Result<PathBuf> {
        let path = c_path(path)?;
        let mut buf = vec![0_u8; libc::PATH_MAX as usize];
        // Safety: the output buffer is writable for its full declared size.
        let written = unsafe {
            ffi::resolvepath(path.as_ptr(), buf.as_mut_ptr().cast(), buf.len())
        };
        if written < 0 {
            return Err(io::Error::last_os_error());
        }
        // resolvepath does not nul-terminate; the return value is the length.
        buf.truncate(written as usize);
        Ok(PathBuf::from(OsString::from_vec(buf)))
    }

    fn resolve_absolute(&self, path: &Path) -> io::Result<PathBuf> {
        let path = c_path(path)?;
        let mut buf = vec![0_u8; libc::PATH_MAX as usize];
        // Safety: realpath writes at most PATH_MAX bytes into the buffer.
        let resolved = unsafe { ffi::realpath(path.as_ptr(), buf.as_mut_ptr().cast()) };
        if resolved.is_null() {
            return Err(io::Error::last_os_error());
        }
        // Safety: realpath nul-terminates the buffer it was handed.
        let bytes = unsafe { CStr::from_ptr(buf.as_ptr().cast()) }.to_bytes();
        Ok(PathBuf::from(OsString::from_vec(bytes.to_vec())))
    }
}
