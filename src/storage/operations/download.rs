use crate::error::Result;
use crate::storage::utils::error::remote_error;
use crate::storage::utils::path::normalize_remote_path;
use opendal::Operator;
use std::path::Path;
use tokio::fs;

/// Trait for downloading a single remote object.
pub trait Downloader {
    /// Download one remote object to a local file, overwriting it.
    ///
    /// # Arguments
    /// * `remote_path` - Source key in storage
    /// * `local_path` - Destination file; missing parent directories are created
    ///
    /// # Returns
    /// * `Result<u64>` - Number of bytes written
    async fn download(&self, remote_path: &str, local_path: &Path) -> Result<u64>;
}

/// Implementation of Downloader for OpenDAL Operator.
pub struct OpenDalDownloader {
    operator: Operator,
}

impl OpenDalDownloader {
    /// Create a new downloader with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Downloader for OpenDalDownloader {
    async fn download(&self, remote_path: &str, local_path: &Path) -> Result<u64> {
        let key = normalize_remote_path(remote_path);
        let data = self
            .operator
            .read(&key)
            .await
            .map_err(|e| remote_error(e, remote_path))?;

        if let Some(parent) = local_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let bytes = data.to_bytes();
        fs::write(local_path, &bytes).await?;
        log::debug!(
            "downloaded {key} -> {} ({} bytes)",
            local_path.display(),
            bytes.len()
        );
        Ok(bytes.len() as u64)
    }
}
