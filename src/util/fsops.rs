// ============================================================================
// src/util/fsops.rs – Thin pass-throughs for whole-file management
// ============================================================================

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Create `path` as a zero-length file, truncating any existing content.
pub fn create_empty_file(path: &Path) -> io::Result<()> {
    File::create(path).map(drop)
}

/// True when `a` and `b` name the same file once symlinks and relative
/// components are resolved. Works for paths that do not exist yet by
/// resolving the parent directory and keeping the file name.
pub fn same_location(a: &Path, b: &Path) -> bool {
    resolve(a) == resolve(b)
}

fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

pub fn delete_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

/// Rename `from` to `to`. Fails if `to` already exists, matching a plain move
/// rather than an overwrite.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("move target already exists: {}", to.display()),
        ));
    }
    fs::rename(from, to)
}

/// Copy `from` to `to`, refusing to overwrite an existing destination.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("copy target already exists: {}", to.display()),
        ));
    }
    fs::copy(from, to).map(drop)
}
