// ============================================================================
// src/metadata.rs – Cached file-info snapshot exposed by a handle
// ============================================================================

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{FileError, Result};

pub const KEY_SIZE: &str = "Size";
pub const KEY_CREATED: &str = "Creation Time";
pub const KEY_ACCESSED: &str = "Last Access Time";
pub const KEY_MODIFIED: &str = "Last Edit Time";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Point-in-time view of a file's size and timestamps. Timestamps are `None`
/// where the platform or filesystem does not record them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub created: Option<DateTime<Local>>,
    pub accessed: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
}

impl FileMetadata {
    pub fn snapshot(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| FileError::io(path, e))?;
        Ok(Self {
            size: meta.len(),
            created: meta.created().ok().map(DateTime::<Local>::from),
            accessed: meta.accessed().ok().map(DateTime::<Local>::from),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
        })
    }

    /// Render as the four-key mapping shown to callers.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_SIZE, self.size.to_string());
        map.insert(KEY_CREATED, render(self.created));
        map.insert(KEY_ACCESSED, render(self.accessed));
        map.insert(KEY_MODIFIED, render(self.modified));
        map
    }
}

/// Serialized as the same four-key mapping `to_map` produces.
impl Serialize for FileMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

fn render(ts: Option<DateTime<Local>>) -> String {
    ts.map(|t| t.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| "unavailable".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn snapshot_reports_size_and_modification() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("f");
        fs::write(&p, "hello\n").unwrap();

        let meta = FileMetadata::snapshot(&p).unwrap();
        assert_eq!(meta.size, 6);
        assert!(meta.modified.is_some());
    }

    #[test]
    fn map_has_exactly_the_four_keys() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("f");
        fs::write(&p, "").unwrap();

        let map = FileMetadata::snapshot(&p).unwrap().to_map();
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(
            keys,
            vec![KEY_CREATED, KEY_ACCESSED, KEY_MODIFIED, KEY_SIZE]
        );
        assert_eq!(map[KEY_SIZE], "0");
    }

    #[test]
    fn serializes_as_the_caller_facing_map() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("f");
        fs::write(&p, "abc").unwrap();

        let value = serde_json::to_value(FileMetadata::snapshot(&p).unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj[KEY_SIZE], "3");
        assert!(obj.contains_key(KEY_CREATED));
        assert!(obj.contains_key(KEY_ACCESSED));
        assert!(obj.contains_key(KEY_MODIFIED));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = FileMetadata::snapshot(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }
}
