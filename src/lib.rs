//! # dirkind
//!
//! List the immediate subdirectories or files of a directory.
//!
//! Each entry is classified by querying its metadata relative to the open
//! directory (`fstatat`), following symbolic links by default. The `.` and
//! `..` pseudo-entries are never returned, and names come back in whatever
//! order the operating system enumerates them.
//!
//! ## Example
//!
//! ```no_run
//! use dirkind::{list_entries, EntryKind};
//!
//! for name in list_entries("/home", EntryKind::Directory) {
//!     println!("{}", name);
//! }
//! ```
//!
//! ## Failure policy
//!
//! [`list_entries`], [`list_directories`] and [`list_files`] never fail: a
//! directory that cannot be opened lists as empty. Use [`try_list_entries`]
//! or [`Lister::try_names`] to tell "empty" apart from "unavailable".
//!
//! Entries whose metadata cannot be read (dangling symlinks, files deleted
//! mid-listing) are omitted under both policies.
//!
//! ## Platform Support
//!
//! Unix only.

#[cfg(not(unix))]
compile_error!("dirkind is only available on Unix platforms");

mod builder;
mod error;
mod ffi;
mod iter;
mod types;

pub use builder::Lister;
pub use error::Error;
pub use iter::Entries;
pub use types::{Entry, EntryKind};

use std::path::Path;

/// List the names of the immediate children of `path` with the given kind.
///
/// Returns an empty vector if the directory cannot be opened.
///
/// # Example
///
/// ```no_run
/// use dirkind::{list_entries, EntryKind};
///
/// let files = list_entries("/etc", EntryKind::File);
/// assert!(!files.iter().any(|n| n == "." || n == ".."));
/// ```
pub fn list_entries<P: AsRef<Path>>(path: P, kind: EntryKind) -> Vec<String> {
    Lister::new(path).kind(kind).names()
}

/// List the names of the subdirectories of `path`.
pub fn list_directories<P: AsRef<Path>>(path: P) -> Vec<String> {
    list_entries(path, EntryKind::Directory)
}

/// List the names of the non-directory children of `path`.
pub fn list_files<P: AsRef<Path>>(path: P) -> Vec<String> {
    list_entries(path, EntryKind::File)
}

/// Like [`list_entries`], but report why a directory could not be listed.
///
/// # Errors
///
/// - [`Error::NotFound`], [`Error::NotADirectory`], [`Error::PermissionDenied`],
///   [`Error::InvalidPath`] or [`Error::Open`] if the directory cannot be opened.
/// - [`Error::Read`] if the directory stream fails partway.
pub fn try_list_entries<P: AsRef<Path>>(path: P, kind: EntryKind) -> Result<Vec<String>, Error> {
    Lister::new(path).kind(kind).try_names()
}
