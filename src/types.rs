//! Entry kinds and listed entries.

use std::fmt;

/// Kind of a directory entry, as decided by its metadata.
///
/// `File` covers every non-directory: regular files, devices, sockets,
/// FIFOs, and symlinks that are not followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Directory
    Directory,
    /// Anything that is not a directory
    File,
}

impl EntryKind {
    /// Classify a raw `st_mode` value.
    pub(crate) fn from_mode(mode: libc::mode_t) -> Self {
        if mode & libc::S_IFMT == libc::S_IFDIR {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::File => write!(f, "file"),
        }
    }
}

/// A single child of a listed directory.
///
/// # String Handling
///
/// `name` is the base name only, never a path. Names that are not valid
/// UTF-8 are converted lossily; invalid bytes become U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Base file name
    pub name: String,
    /// Directory or non-directory
    pub kind: EntryKind,
}

impl Entry {
    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Check if this entry is anything other than a directory.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}
