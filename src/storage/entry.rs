use crate::storage::utils::size::format_size;
use serde::Serialize;
use std::fmt;

/// Whether a listed entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    File,
    Directory,
}

/// Descriptor of one remote object or file returned by a listing.
///
/// - `name`: identifier relative to the queried path, without trailing `/`
/// - `path`: full remote key as reported by the backend
/// - `size`: content length in bytes, 0 for directories
/// - `last_modified`: backend timestamp if available
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub size: u64,
    pub last_modified: Option<String>,
}

impl StorageEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

impl fmt::Display for StorageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_type = if self.is_dir() { "DIR" } else { "FILE" };
        let size_str = if self.is_dir() {
            "-".to_string()
        } else {
            format_size(self.size)
        };
        let modified = self.last_modified.as_deref().unwrap_or("Unknown");
        write!(f, "{file_type:<6} {size_str:>10} {modified} {}", self.name)
    }
}
