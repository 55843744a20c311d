//! Thin helpers over the POSIX directory API.
//!
//! Reference: dirent.h, sys/stat.h, fcntl.h
//!
//! # Safety
//!
//! The functions taking raw descriptors are unsafe. The safe wrappers are
//! provided by [`crate::iter::Entries`].

use bitflags::bitflags;
use std::ffi::{CStr, CString};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

bitflags! {
    /// Flags passed to `fstatat`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AtFlags: libc::c_int {
        const SYMLINK_NOFOLLOW = libc::AT_SYMLINK_NOFOLLOW;
    }
}

impl AtFlags {
    /// Flags for a metadata query with the given symlink policy.
    pub fn for_symlinks(follow: bool) -> Self {
        if follow {
            AtFlags::empty()
        } else {
            AtFlags::SYMLINK_NOFOLLOW
        }
    }
}

/// True for the `.` and `..` entries every directory stream reports.
pub fn is_pseudo_entry(name: &[u8]) -> bool {
    name == b"." || name == b".."
}

/// Convert a path to the NUL-terminated form the C API expects.
///
/// Returns `None` if the path contains an interior NUL byte.
pub fn path_to_cstring(path: &Path) -> Option<CString> {
    CString::new(path.as_os_str().as_bytes()).ok()
}

/// Query metadata for `name` relative to the open directory `dirfd`.
///
/// # Safety
///
/// `dirfd` must be a valid open directory file descriptor.
pub unsafe fn stat_at(dirfd: libc::c_int, name: &CStr, flags: AtFlags) -> io::Result<libc::stat> {
    let mut st = MaybeUninit::<libc::stat>::uninit();
    if libc::fstatat(dirfd, name.as_ptr(), st.as_mut_ptr(), flags.bits()) == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(st.assume_init())
}

/// Reset `errno` to zero so a NULL from `readdir` can be told apart from an error.
///
/// Returns `false` on targets where `errno` cannot be reset; callers must then
/// treat a NULL from `readdir` as end of stream.
pub fn clear_errno() -> bool {
    match errno_location() {
        Some(errno) => {
            // SAFETY: the pointer refers to this thread's errno slot.
            unsafe { *errno = 0 };
            true
        }
        None => false,
    }
}

#[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "redox"))]
fn errno_location() -> Option<*mut libc::c_int> {
    Some(unsafe { libc::__errno_location() })
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
fn errno_location() -> Option<*mut libc::c_int> {
    Some(unsafe { libc::__errno() })
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
fn errno_location() -> Option<*mut libc::c_int> {
    Some(unsafe { libc::__error() })
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "emscripten",
    target_os = "redox",
    target_os = "android",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
)))]
fn errno_location() -> Option<*mut libc::c_int> {
    None
}
