// ============================================================================
// src/error.rs – Error taxonomy surfaced by handles and the audit logger
// ============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mode::AccessMode;

#[derive(Debug, Error)]
pub enum FileError {
    /// Target absent and the handle was built without create-if-missing.
    #[error("file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("access denied: cannot open {} in mode {mode}", path.display())]
    AccessDenied { path: PathBuf, mode: AccessMode },

    /// The audit log resolves to the handled file itself.
    #[error("audit log and target are the same file: {}", path.display())]
    LogIsTarget { path: PathBuf },

    #[error("invalid mode {token:?} (expected R, W or A)")]
    InvalidMode { token: String },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The audit trail could not be appended to. Kept apart from `Io` so a
    /// caller can tell a failed target write from a failed audit write.
    #[error("audit log {} not writable: {source}", path.display())]
    Audit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FileError>;

impl FileError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Map an error raised while opening `path` for `mode` onto the taxonomy.
    pub(crate) fn on_open(path: &Path, mode: AccessMode, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => FileError::AccessDenied {
                path: path.to_path_buf(),
                mode,
            },
            io::ErrorKind::NotFound => FileError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => FileError::io(path, source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn permission_denied_on_open_becomes_access_denied() {
        let err = FileError::on_open(
            Path::new("/tmp/x"),
            AccessMode::Write,
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(
            err,
            FileError::AccessDenied {
                mode: AccessMode::Write,
                ..
            }
        ));
    }

    #[test]
    fn not_found_on_open_becomes_file_not_found() {
        let err = FileError::on_open(
            Path::new("/tmp/missing"),
            AccessMode::Read,
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, FileError::FileNotFound { .. }));
        assert!(err.to_string().contains("/tmp/missing"));
    }

    #[test]
    fn other_kinds_stay_io_and_keep_their_source() {
        let err = FileError::on_open(
            Path::new("/tmp/x"),
            AccessMode::Append,
            io::Error::new(io::ErrorKind::Other, "disk on fire"),
        );
        assert!(matches!(err, FileError::Io { .. }));
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }
}
