use crate::error::{LocalNotFoundSnafu, NotAFileSnafu, Result};
use crate::storage::constants::DEFAULT_BUFFER_SIZE;
use crate::storage::utils::path::{build_remote_path, normalize_remote_path};
use opendal::Operator;
use snafu::ensure;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

/// Trait for uploading a local file to storage.
pub trait Uploader {
    /// Upload a single local file, overwriting the remote object.
    ///
    /// # Arguments
    /// * `local_path` - Source file on the local filesystem
    /// * `remote_path` - Destination key; a trailing `/` appends the local file name
    ///
    /// # Returns
    /// * `Result<UploadReport>` - Final remote key and bytes written
    async fn upload(&self, local_path: &Path, remote_path: &str) -> Result<UploadReport>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub remote_path: String,
    pub bytes: u64,
}

/// Implementation of Uploader for OpenDAL Operator.
pub struct OpenDalUploader {
    operator: Operator,
}

impl OpenDalUploader {
    /// Create a new uploader with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Stream a single file into a remote writer.
    async fn upload_file_streaming(&self, local_path: &Path, remote_path: &str) -> Result<u64> {
        let file = fs::File::open(local_path).await?;
        let mut reader = BufReader::new(file);
        let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
        let mut total_bytes = 0u64;
        let mut writer = self.operator.writer(remote_path).await?;

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            writer.write(buffer[..bytes_read].to_vec()).await?;
            total_bytes += bytes_read as u64;
        }
        writer.close().await?;
        Ok(total_bytes)
    }
}

impl Uploader for OpenDalUploader {
    async fn upload(&self, local_path: &Path, remote_path: &str) -> Result<UploadReport> {
        let metadata = fs::metadata(local_path).await.ok();
        ensure!(
            metadata.is_some(),
            LocalNotFoundSnafu {
                path: local_path.to_path_buf()
            }
        );
        ensure!(
            metadata.is_some_and(|m| m.is_file()),
            NotAFileSnafu {
                path: local_path.to_path_buf()
            }
        );

        let file_name = local_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let remote_file_path = build_remote_path(&normalize_remote_path(remote_path), &file_name);

        let bytes = self
            .upload_file_streaming(local_path, &remote_file_path)
            .await?;
        log::debug!(
            "uploaded {} -> {remote_file_path} ({bytes} bytes)",
            local_path.display()
        );

        Ok(UploadReport {
            remote_path: remote_file_path,
            bytes,
        })
    }
}
