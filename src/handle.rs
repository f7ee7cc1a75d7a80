// ============================================================================
// src/handle.rs – Mode-switching single-file handle
// ============================================================================
//! One `FileHandle` mediates every read, write and append against one path.
//! Resources are opened lazily for the requested mode and released before
//! each operation returns, so a handle is at rest between calls.
//!
//! Operations take `&mut self`; sharing one handle between threads requires
//! the caller to wrap it in a `Mutex`. Separate processes touching the same
//! path can still interleave between one close and the next open, which can
//! lose updates. Nothing here coordinates across processes.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{FileError, Result};
use crate::metadata::FileMetadata;
use crate::mode::AccessMode;
use crate::util::audit::{AuditEvent, AuditLogger};
use crate::util::{fsops, permissions};

/// OS resource backing the current mode.
#[derive(Debug)]
enum Resource {
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

impl Resource {
    fn open(path: &Path, mode: AccessMode) -> io::Result<Self> {
        match mode {
            AccessMode::Read => File::open(path).map(|f| Resource::Reader(BufReader::new(f))),
            AccessMode::Write => OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(path)
                .map(|f| Resource::Writer(BufWriter::new(f))),
            AccessMode::Append => OpenOptions::new()
                .append(true)
                .open(path)
                .map(|f| Resource::Writer(BufWriter::new(f))),
        }
    }

    fn rewind(&mut self) -> io::Result<()> {
        if let Resource::Reader(reader) = self {
            reader.seek(SeekFrom::Start(0))?;
        }
        Ok(())
    }

    fn read_lines(&mut self) -> io::Result<Vec<String>> {
        match self {
            Resource::Reader(reader) => reader.lines().collect(),
            Resource::Writer(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                "resource is not open for reading",
            )),
        }
    }

    fn write_lines<S: AsRef<str>>(&mut self, lines: &[S], terminate: bool) -> io::Result<()> {
        let Resource::Writer(writer) = self else {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "resource is not open for writing",
            ));
        };
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            if terminate {
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    /// Flush buffered output and release the descriptor.
    fn close(self) -> io::Result<()> {
        match self {
            Resource::Reader(_) => Ok(()),
            Resource::Writer(mut writer) => writer.flush(),
        }
    }
}

#[derive(Debug)]
struct Active {
    mode: AccessMode,
    resource: Resource,
}

#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    initial_mode: AccessMode,
    create_if_missing: bool,
    active: Option<Active>,
    metadata: FileMetadata,
    logger: AuditLogger,
}

impl FileHandle {
    /// Open a handle that creates `path` when it is absent.
    pub fn open<P, L>(path: P, mode: AccessMode, log_path: L) -> Result<Self>
    where
        P: AsRef<Path>,
        L: AsRef<Path>,
    {
        Self::open_with_policy(path, mode, log_path, true)
    }

    /// Open a handle over `path`, auditing to `log_path`.
    ///
    /// With `create_if_missing` off, an absent target fails with
    /// `FileNotFound` before anything on disk is touched. The initial mode
    /// is checked for permission here but no resource is opened until the
    /// first operation.
    pub fn open_with_policy<P, L>(
        path: P,
        mode: AccessMode,
        log_path: L,
        create_if_missing: bool,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        L: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        if fsops::same_location(&path, log_path.as_ref()) {
            return Err(FileError::LogIsTarget { path });
        }
        if !create_if_missing && !fsops::file_exists(&path) {
            return Err(FileError::FileNotFound { path });
        }

        let mut handle = Self {
            path,
            initial_mode: mode,
            create_if_missing,
            active: None,
            metadata: FileMetadata::default(),
            logger: AuditLogger::new(log_path)?,
        };
        handle.ensure_exists()?;
        handle.check_permission(mode)?;
        handle.refresh_metadata()?;
        debug!(path = %handle.path.display(), mode = %mode, "handle ready");
        Ok(handle)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn initial_mode(&self) -> AccessMode {
        self.initial_mode
    }

    pub fn create_if_missing(&self) -> bool {
        self.create_if_missing
    }

    pub fn log_path(&self) -> &Path {
        self.logger.log_path()
    }

    /// Current mode; `None` means no resource is held.
    pub fn mode(&self) -> Option<AccessMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    pub fn is_at_rest(&self) -> bool {
        self.active.is_none()
    }

    /// Snapshot taken at the end of the last completed operation.
    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn metadata_map(&self) -> BTreeMap<&'static str, String> {
        self.metadata.to_map()
    }

    /// Read the whole file from offset 0.
    pub fn read(&mut self) -> Result<Vec<String>> {
        self.run(AccessMode::Read, AuditEvent::Read, Resource::read_lines)
    }

    /// Replace the file's content with `lines`.
    pub fn write<S: AsRef<str>>(&mut self, lines: &[S], terminate_each_line: bool) -> Result<()> {
        self.run(AccessMode::Write, AuditEvent::WrittenTo, |r| {
            r.write_lines(lines, terminate_each_line)
        })
    }

    /// Add `lines` after the file's existing content.
    pub fn append<S: AsRef<str>>(&mut self, lines: &[S], terminate_each_line: bool) -> Result<()> {
        self.run(AccessMode::Append, AuditEvent::AppendedTo, |r| {
            r.write_lines(lines, terminate_each_line)
        })
    }

    /// Flush and release whatever resource is held. No-op when at rest.
    /// The handle is at rest afterwards even if the flush failed.
    pub fn close(&mut self) -> Result<()> {
        match self.active.take() {
            None => Ok(()),
            Some(active) => {
                debug!(path = %self.path.display(), mode = %active.mode, "closing resource");
                active
                    .resource
                    .close()
                    .map_err(|e| FileError::io(&self.path, e))
            }
        }
    }

    /// Close and release the handle, reporting a failed final flush.
    pub fn dispose(mut self) -> Result<()> {
        self.close()
    }

    pub fn is_readable(&self) -> bool {
        permissions::can_read(&self.path)
    }

    pub fn is_writable(&self) -> bool {
        permissions::can_write(&self.path)
    }

    pub fn is_appendable(&self) -> bool {
        permissions::can_append(&self.path)
    }

    /// Truncate the target to zero length, creating it if needed.
    pub fn recreate(&mut self) -> Result<()> {
        self.close()?;
        fsops::create_empty_file(&self.path)
            .map_err(|e| FileError::on_open(&self.path, AccessMode::Write, e))?;
        self.refresh_metadata()
    }

    pub fn copy_to<P: AsRef<Path>>(&mut self, dest: P) -> Result<()> {
        self.close()?;
        fsops::copy_file(&self.path, dest.as_ref()).map_err(|e| FileError::io(&self.path, e))
    }

    /// Move the target and follow it: later operations act on `dest`.
    pub fn move_to<P: AsRef<Path>>(&mut self, dest: P) -> Result<()> {
        self.close()?;
        let dest = dest.as_ref();
        if fsops::same_location(dest, self.logger.log_path()) {
            return Err(FileError::LogIsTarget {
                path: dest.to_path_buf(),
            });
        }
        fsops::move_file(&self.path, dest).map_err(|e| FileError::io(&self.path, e))?;
        debug!(from = %self.path.display(), to = %dest.display(), "target moved");
        self.path = dest.to_path_buf();
        self.refresh_metadata()
    }

    /// Remove the target from disk, consuming the handle.
    pub fn delete(mut self) -> Result<()> {
        self.close()?;
        fsops::delete_file(&self.path).map_err(|e| FileError::io(&self.path, e))
    }

    // ------------------------------------------------------------------------
    // Mode state machine
    // ------------------------------------------------------------------------

    /// ensure mode -> I/O -> close -> audit -> refresh metadata.
    fn run<T, F>(&mut self, mode: AccessMode, event: AuditEvent, op: F) -> Result<T>
    where
        F: FnOnce(&mut Resource) -> io::Result<T>,
    {
        let outcome = self.ensure_mode(mode).map(op);
        let closed = self.close();
        let value = match outcome {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => return Err(FileError::io(&self.path, e)),
            Err(e) => return Err(e),
        };
        closed?;

        self.logger.record(&self.path, event)?;
        self.refresh_metadata()?;
        Ok(value)
    }

    /// Bring the handle into `requested` mode. A resource held for another
    /// mode is flushed and released first; a reader is always rewound to the
    /// start. On error the handle is left at rest.
    fn ensure_mode(&mut self, requested: AccessMode) -> Result<&mut Resource> {
        let mut active = match self.active.take() {
            Some(active) if active.mode == requested => active,
            Some(stale) => {
                debug!(
                    path = %self.path.display(),
                    from = %stale.mode,
                    to = %requested,
                    "switching access mode"
                );
                stale
                    .resource
                    .close()
                    .map_err(|e| FileError::io(&self.path, e))?;
                self.activate(requested)?
            }
            None => self.activate(requested)?,
        };
        active
            .resource
            .rewind()
            .map_err(|e| FileError::io(&self.path, e))?;
        Ok(&mut self.active.insert(active).resource)
    }

    fn activate(&self, mode: AccessMode) -> Result<Active> {
        self.ensure_exists()?;
        self.check_permission(mode)?;
        let resource =
            Resource::open(&self.path, mode).map_err(|e| FileError::on_open(&self.path, mode, e))?;
        debug!(path = %self.path.display(), mode = %mode, "opened resource");
        Ok(Active { mode, resource })
    }

    fn ensure_exists(&self) -> Result<()> {
        if fsops::file_exists(&self.path) {
            return Ok(());
        }
        if !self.create_if_missing {
            return Err(FileError::FileNotFound {
                path: self.path.clone(),
            });
        }
        fsops::create_empty_file(&self.path)
            .map_err(|e| FileError::on_open(&self.path, AccessMode::Write, e))?;
        info!(path = %self.path.display(), "created missing file");
        self.logger.record(&self.path, AuditEvent::Created)
    }

    fn check_permission(&self, mode: AccessMode) -> Result<()> {
        if permissions::probe(&self.path, mode) {
            Ok(())
        } else {
            Err(FileError::AccessDenied {
                path: self.path.clone(),
                mode,
            })
        }
    }

    fn refresh_metadata(&mut self) -> Result<()> {
        self.metadata = FileMetadata::snapshot(&self.path)?;
        Ok(())
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            warn!(
                path = %self.path.display(),
                mode = %active.mode,
                "handle dropped while holding an open resource"
            );
            if let Err(e) = active.resource.close() {
                warn!(path = %self.path.display(), error = %e, "flush on drop failed");
            }
        }
    }
}
