//! Builder pattern API for directory listing.
//!
//! Provides a fluent interface for configuring a listing.

use crate::error::Error;
use crate::iter::Entries;
use crate::types::{Entry, EntryKind};
use std::path::{Path, PathBuf};

/// Builder for configuring a directory listing.
///
/// # Example
///
/// ```no_run
/// use dirkind::Lister;
///
/// let subdirs = Lister::new("/tmp")
///     .directories()
///     .follow_symlinks(false)
///     .try_names()?;
///
/// for name in subdirs {
///     println!("{}", name);
/// }
/// # Ok::<(), dirkind::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lister {
    path: PathBuf,
    kind: Option<EntryKind>,
    follow_symlinks: bool,
}

impl Lister {
    /// Create a new lister for the given directory.
    ///
    /// By default every entry is returned regardless of kind, and symbolic
    /// links are followed when classifying.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            kind: None,
            follow_symlinks: true,
        }
    }

    /// Only return entries of the given kind.
    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Only return subdirectories.
    pub fn directories(self) -> Self {
        self.kind(EntryKind::Directory)
    }

    /// Only return non-directories.
    pub fn files(self) -> Self {
        self.kind(EntryKind::File)
    }

    /// Control whether symbolic links are followed when classifying.
    ///
    /// When `false`, uses `AT_SYMLINK_NOFOLLOW`, so every symlink counts as a
    /// file and dangling symlinks are listed instead of skipped.
    /// Default is `true` (follow symlinks).
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Open the directory and return an iterator over matching entries.
    pub fn read(&self) -> Result<Entries, Error> {
        Entries::new(&self.path, self.kind, self.follow_symlinks)
    }

    /// Collect matching names, failing if the directory cannot be opened or
    /// the stream reports an error.
    pub fn try_names(&self) -> Result<Vec<String>, Error> {
        collect_names(self.read()?)
    }

    /// Collect matching names, treating every failure as "no more entries".
    ///
    /// An unopenable directory yields an empty vector. A stream error midway
    /// yields the names read up to that point.
    pub fn names(&self) -> Vec<String> {
        match self.read() {
            Ok(entries) => collect_names_until_error(&self.path, entries),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "directory unavailable, listing nothing");
                Vec::new()
            }
        }
    }
}

/// Collect names, stopping at the first error.
fn collect_names<I>(entries: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator<Item = Result<Entry, Error>>,
{
    entries.into_iter().map(|entry| entry.map(|e| e.name)).collect()
}

/// Collect names up to the first error, which is logged and dropped.
fn collect_names_until_error<I>(path: &Path, entries: I) -> Vec<String>
where
    I: IntoIterator<Item = Result<Entry, Error>>,
{
    let mut names = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => names.push(entry.name),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "listing cut short");
                break;
            }
        }
    }
    names
}
