use crate::error::Result;
use crate::storage::entry::{EntryKind, StorageEntry};
use crate::storage::operations::Namespace;
use crate::storage::utils::error::remote_error;
use crate::storage::utils::path::{
    basename, ensure_trailing_slash, normalize_remote_path, relative_name,
};
use futures::stream::TryStreamExt;
use opendal::{Entry, Metadata, Operator};

/// Trait for listing entries in storage.
pub trait Lister {
    /// List entries under a prefix or directory.
    ///
    /// # Arguments
    /// * `path` - Key prefix (flat namespace) or directory path (hierarchical namespace)
    ///
    /// # Returns
    /// * `Result<Vec<StorageEntry>>` - Entries in backend order
    async fn list(&self, path: &str) -> Result<Vec<StorageEntry>>;
}

/// Implementation of Lister for OpenDAL Operator.
pub struct OpenDalLister {
    operator: Operator,
    namespace: Namespace,
}

impl OpenDalLister {
    /// Create a new lister with the given OpenDAL operator.
    pub fn new(operator: Operator, namespace: Namespace) -> Self {
        Self {
            operator,
            namespace,
        }
    }

    /// Every key starting with `prefix`. A prefix with no matches is an empty listing.
    async fn list_flat(&self, prefix: &str) -> Result<Vec<StorageEntry>> {
        let prefix = normalize_remote_path(prefix);
        let lister = match self.operator.lister_with(&prefix).recursive(true).await {
            Ok(lister) => lister,
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let entries: Vec<Entry> = match lister.try_collect().await {
            Ok(entries) => entries,
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut result = Vec::with_capacity(entries.len());
        for entry in entries {
            // Flat stores have no directories, only `/`-terminated marker keys.
            if entry.metadata().mode().is_dir() {
                continue;
            }
            let name = relative_name(entry.path(), &prefix);
            result.push(self.describe(entry, name).await?);
        }
        Ok(result)
    }

    /// Immediate children of `path`. A missing path is `RemoteNotFound`.
    async fn list_hierarchical(&self, path: &str) -> Result<Vec<StorageEntry>> {
        let dir = normalize_remote_path(path);
        if !dir.trim_end_matches('/').is_empty() {
            let meta = self
                .operator
                .stat(&dir)
                .await
                .map_err(|e| remote_error(e, path))?;
            if !meta.mode().is_dir() {
                let name = basename(&dir);
                return Ok(vec![self.entry_from_parts(dir, name, meta)]);
            }
        }

        let dir = ensure_trailing_slash(&dir);
        let lister = self
            .operator
            .lister(&dir)
            .await
            .map_err(|e| remote_error(e, path))?;
        let entries: Vec<Entry> = lister
            .try_collect()
            .await
            .map_err(|e| remote_error(e, path))?;

        let mut result = Vec::with_capacity(entries.len());
        for entry in entries {
            // The listed directory reports itself.
            if entry.path().trim_matches('/') == dir.trim_matches('/') {
                continue;
            }
            let name = relative_name(entry.path(), &dir);
            result.push(self.describe(entry, name).await?);
        }
        Ok(result)
    }

    /// Turn a listed entry into a `StorageEntry`, filling size and mtime with a
    /// stat when the listed metadata is incomplete.
    async fn describe(&self, entry: Entry, name: String) -> Result<StorageEntry> {
        let path = entry.path().to_string();
        let mut meta = entry.metadata().clone();

        // Some listers report files with a zero length and no mtime.
        let incomplete = meta.last_modified().is_none() || meta.content_length() == 0;
        if !meta.mode().is_dir() && incomplete {
            meta = self
                .operator
                .stat(&path)
                .await
                .map_err(|e| remote_error(e, &path))?;
        }

        Ok(self.entry_from_parts(path, name, meta))
    }

    fn entry_from_parts(&self, path: String, name: String, meta: Metadata) -> StorageEntry {
        let kind = if meta.mode().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let size = match kind {
            EntryKind::File => meta.content_length(),
            EntryKind::Directory => 0,
        };
        StorageEntry {
            name,
            path,
            kind,
            size,
            last_modified: meta.last_modified().map(|t| t.to_string()),
        }
    }
}

impl Lister for OpenDalLister {
    async fn list(&self, path: &str) -> Result<Vec<StorageEntry>> {
        match self.namespace {
            Namespace::Flat => self.list_flat(path).await,
            Namespace::Hierarchical => self.list_hierarchical(path).await,
        }
    }
}
