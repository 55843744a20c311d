//! Iterator implementation for directory entries.
//!
//! This module provides the `Entries` iterator that lazily reads a
//! directory stream with `readdir` and classifies each entry with `fstatat`.

use crate::error::Error;
use crate::ffi::{self, AtFlags};
use crate::types::{Entry, EntryKind};
use std::ffi::CStr;
use std::io;
use std::path::Path;
use std::ptr::NonNull;

/// Iterator over the classified children of a directory.
///
/// Yields `Result<Entry, Error>` for each entry matching the kind filter.
/// `.` and `..` are never yielded. Entries whose metadata cannot be read
/// (dangling symlinks, entries removed mid-listing) are skipped.
///
/// The directory handle is closed when the iterator is dropped, whether or
/// not it was run to completion.
///
/// # Thread Safety
///
/// `Entries` implements `Send` but not `Sync`. A directory stream must not be
/// advanced from two threads at once.
///
/// # Example
///
/// ```no_run
/// use dirkind::{EntryKind, Lister};
///
/// for entry in Lister::new("/tmp").kind(EntryKind::Directory).read()? {
///     println!("{}", entry?.name);
/// }
/// # Ok::<(), dirkind::Error>(())
/// ```
pub struct Entries {
    dir: NonNull<libc::DIR>,
    filter: Option<EntryKind>,
    stat_flags: AtFlags,
    exhausted: bool,
}

// SAFETY: the DIR pointer is owned and only touched through &mut self or drop.
unsafe impl Send for Entries {}

impl Entries {
    /// Open `path` and prepare to enumerate it.
    pub(crate) fn new(
        path: &Path,
        filter: Option<EntryKind>,
        follow_symlinks: bool,
    ) -> Result<Self, Error> {
        let dir = open_directory(path)?;

        Ok(Self {
            dir,
            filter,
            stat_flags: AtFlags::for_symlinks(follow_symlinks),
            exhausted: false,
        })
    }

    /// Classify one raw entry name, or `None` if it must be skipped.
    fn classify(&self, name: &CStr) -> Option<Entry> {
        let bytes = name.to_bytes();
        if ffi::is_pseudo_entry(bytes) {
            return None;
        }

        // SAFETY: self.dir is an open stream, so dirfd yields a valid descriptor.
        let stat = unsafe {
            let fd = libc::dirfd(self.dir.as_ptr());
            ffi::stat_at(fd, name, self.stat_flags)
        };
        let stat = match stat {
            Ok(st) => st,
            Err(err) => {
                tracing::trace!(name = %String::from_utf8_lossy(bytes), %err, "skipping entry without metadata");
                return None;
            }
        };

        let kind = EntryKind::from_mode(stat.st_mode);
        if self.filter.is_some_and(|wanted| wanted != kind) {
            return None;
        }

        Some(Entry {
            name: String::from_utf8_lossy(bytes).into_owned(),
            kind,
        })
    }
}

impl Iterator for Entries {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let errno_tracked = ffi::clear_errno();
            // SAFETY: self.dir stays open until drop and is not shared.
            let dirent = unsafe { libc::readdir(self.dir.as_ptr()) };

            if dirent.is_null() {
                self.exhausted = true;
                let err = io::Error::last_os_error();
                return match err.raw_os_error() {
                    Some(code) if errno_tracked && code != 0 => Some(Err(Error::Read(err))),
                    _ => None,
                };
            }

            // SAFETY: readdir returned a valid dirent whose d_name is NUL-terminated;
            // the borrow ends before the next readdir call.
            let name = unsafe { CStr::from_ptr((*dirent).d_name.as_ptr()) };
            if let Some(entry) = self.classify(name) {
                return Some(Ok(entry));
            }
        }
        None
    }
}

impl Drop for Entries {
    fn drop(&mut self) {
        // SAFETY: self.dir came from a successful opendir and is closed only here.
        unsafe {
            libc::closedir(self.dir.as_ptr());
        }
    }
}

/// Open a directory stream.
fn open_directory(path: &Path) -> Result<NonNull<libc::DIR>, Error> {
    let c_path = ffi::path_to_cstring(path).ok_or_else(|| Error::InvalidPath(path.to_owned()))?;

    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    let dir = unsafe { libc::opendir(c_path.as_ptr()) };

    NonNull::new(dir).ok_or_else(|| Error::from_open(path, io::Error::last_os_error()))
}
