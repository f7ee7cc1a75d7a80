// ============================================================================
// src/lib.rs – filewarden: one handle, one file, every access audited
// ============================================================================
//! A [`FileHandle`] owns one path and switches between read, write and
//! append access on demand, opening the OS resource only for the duration of
//! a call. Every creation, read, write and append is recorded as one line in
//! an append-only audit log through [`AuditLogger`].

pub mod config;
pub mod error;
pub mod handle;
pub mod metadata;
pub mod mode;
pub mod table;
pub mod util;

pub use error::{FileError, Result};
pub use handle::FileHandle;
pub use metadata::FileMetadata;
pub use mode::AccessMode;
pub use util::audit::{AuditEntry, AuditEvent, AuditLogger};
