// ============================================================================
// src/util/audit.rs – Append-only audit trail (open, write one line, close)
// ============================================================================

use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{FileError, Result};

/// Timestamp layout used for audit lines. Not part of any contract; readers
/// should split on the ` at ` separator rather than parse this.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lifecycle event recorded for a handled file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    Created,
    Read,
    WrittenTo,
    AppendedTo,
}

impl AuditEvent {
    const ALL: [AuditEvent; 4] = [
        AuditEvent::Created,
        AuditEvent::Read,
        AuditEvent::WrittenTo,
        AuditEvent::AppendedTo,
    ];

    pub fn phrase(self) -> &'static str {
        match self {
            AuditEvent::Created => "created",
            AuditEvent::Read => "read",
            AuditEvent::WrittenTo => "written to",
            AuditEvent::AppendedTo => "appended to",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.phrase())
    }
}

/// One parsed audit line: `<path> <event> at <timestamp>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub path: String,
    pub event: AuditEvent,
    pub timestamp: String,
}

impl AuditEntry {
    /// Split a line back into its parts. Returns `None` for lines that do not
    /// follow the audit format. Paths may contain spaces; timestamps may not
    /// contain ` at `.
    pub fn parse(line: &str) -> Option<Self> {
        let (head, timestamp) = line.rsplit_once(" at ")?;
        AuditEvent::ALL.iter().find_map(|event| {
            let path = head.strip_suffix(event.phrase())?.strip_suffix(' ')?;
            if path.is_empty() {
                return None;
            }
            Some(AuditEntry {
                path: path.to_string(),
                event: *event,
                timestamp: timestamp.to_string(),
            })
        })
    }
}

/// Appends lines to a fixed log file. Holds no open descriptor between calls:
/// each `log` opens in append mode, writes, flushes, and drops the file.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Bind a logger to `log_path`, creating the file if it is absent.
    /// Existing entries are never truncated.
    pub fn new<P: AsRef<Path>>(log_path: P) -> Result<Self> {
        let logger = Self {
            log_path: log_path.as_ref().to_path_buf(),
        };
        logger.open_for_append()?;
        Ok(logger)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append `line` plus a newline. Failures surface as `FileError::Audit`.
    pub fn log(&self, line: &str) -> Result<()> {
        let mut file = self.open_for_append()?;
        writeln!(file, "{line}").map_err(|e| self.audit_error(e))?;
        file.flush().map_err(|e| self.audit_error(e))?;
        Ok(())
    }

    /// Record `event` for `path`, stamped with the local time.
    pub fn record(&self, path: &Path, event: AuditEvent) -> Result<()> {
        let ts = Local::now().format(TIMESTAMP_FORMAT);
        self.log(&format!("{} {event} at {ts}", path.display()))
    }

    /// Read back every well-formed entry in log order.
    pub fn entries(&self) -> Result<Vec<AuditEntry>> {
        let text = fs::read_to_string(&self.log_path).map_err(|e| self.audit_error(e))?;
        Ok(text.lines().filter_map(AuditEntry::parse).collect())
    }

    fn open_for_append(&self) -> Result<fs::File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.audit_error(e))
    }

    fn audit_error(&self, source: std::io::Error) -> FileError {
        FileError::Audit {
            path: self.log_path.clone(),
            source,
        }
    }
}
