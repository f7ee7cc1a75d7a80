// ============================================================================
// src/util/permissions.rs – Boolean permission probes via access(2)
// ============================================================================

use nix::unistd::{access, AccessFlags};
use std::path::Path;

use crate::mode::AccessMode;

// access(2) answers for the real UID. Under setuid the effective UID can
// differ, so a passing check is advisory; the open itself still maps EACCES
// to `FileError::AccessDenied`.

pub fn can_read(path: &Path) -> bool {
    access(path, AccessFlags::R_OK).is_ok()
}

pub fn can_write(path: &Path) -> bool {
    access(path, AccessFlags::W_OK).is_ok()
}

/// POSIX has no separate append bit; appending needs write permission.
pub fn can_append(path: &Path) -> bool {
    can_write(path)
}

pub fn probe(path: &Path, mode: AccessMode) -> bool {
    match mode {
        AccessMode::Read => can_read(path),
        AccessMode::Write => can_write(path),
        AccessMode::Append => can_append(path),
    }
}
