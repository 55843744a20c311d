//! Error types for dirkind.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for strict listing operations.
///
/// The fail-soft functions never return this; they log it and yield an
/// empty (or partial) result instead.
#[derive(Debug)]
pub enum Error {
    /// The path does not exist.
    NotFound(PathBuf),
    /// The path exists but is not a directory.
    NotADirectory(PathBuf),
    /// Read access to the directory is denied.
    PermissionDenied(PathBuf),
    /// The path contains an interior NUL byte.
    InvalidPath(PathBuf),
    /// Any other failure to open the directory.
    Open(io::Error),
    /// The directory stream reported an error while enumerating.
    Read(io::Error),
}

impl Error {
    /// Classify an `opendir` failure for `path`.
    pub(crate) fn from_open(path: &Path, err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::ENOENT) => Error::NotFound(path.to_owned()),
            Some(libc::ENOTDIR) => Error::NotADirectory(path.to_owned()),
            Some(libc::EACCES) | Some(libc::EPERM) => Error::PermissionDenied(path.to_owned()),
            _ => Error::Open(err),
        }
    }

    /// True if the directory could not be opened at all.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Error::Read(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(p) => write!(f, "no such directory: {}", p.display()),
            Error::NotADirectory(p) => write!(f, "not a directory: {}", p.display()),
            Error::PermissionDenied(p) => write!(f, "permission denied: {}", p.display()),
            Error::InvalidPath(p) => write!(f, "path contains a NUL byte: {}", p.display()),
            Error::Open(e) => write!(f, "failed to open directory: {}", e),
            Error::Read(e) => write!(f, "readdir failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open(e) | Error::Read(e) => Some(e),
            _ => None,
        }
    }
}
