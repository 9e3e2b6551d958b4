use crate::error::Result;
use opendal::Operator;
use std::path::Path;

pub mod adapter;
pub mod constants;
pub mod entry;
pub mod outcome;
mod operations;
pub mod utils;

pub use self::adapter::StorageAdapter;
pub use self::entry::{EntryKind, StorageEntry};
pub use self::operations::Namespace;
pub use self::outcome::{Failure, Outcome, StatusMessage};

use self::constants::S3_SCHEME;
use self::operations::delete::OpenDalDeleter;
use self::operations::download::OpenDalDownloader;
use self::operations::list::OpenDalLister;
use self::operations::mkdir::OpenDalMkdirer;
use self::operations::upload::OpenDalUploader;
use self::operations::{Deleter, Downloader, Lister, Mkdirer, Uploader};
use crate::wrap_err;

/// Connection parameters for an S3-compatible object store.
#[derive(Debug, Clone, Default)]
pub struct ObjectStorageConfig {
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl ObjectStorageConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }
}

/// Connection parameters for a WebDAV (Nextcloud) server.
#[derive(Clone)]
pub struct FileSyncConfig {
    /// Base URL, which may include a path such as `/remote.php/dav/files/<user>/`.
    pub url: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for FileSyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSyncConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Backend selection, made once at the boundary.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    ObjectStorage(ObjectStorageConfig),
    FileSync(FileSyncConfig),
}

impl BackendConfig {
    pub fn namespace(&self) -> Namespace {
        match self {
            BackendConfig::ObjectStorage(_) => Namespace::Flat,
            BackendConfig::FileSync(_) => Namespace::Hierarchical,
        }
    }

    /// Human readable location of `key` on this backend.
    pub fn location(&self, key: &str) -> String {
        match self {
            BackendConfig::ObjectStorage(cfg) => {
                format!("{S3_SCHEME}{}/{}", cfg.bucket, key.trim_start_matches('/'))
            }
            BackendConfig::FileSync(_) => format!("/{}", key.trim_start_matches('/')),
        }
    }
}

/// Unified storage client using OpenDAL
#[derive(Clone)]
pub struct StorageClient {
    operator: Operator,
    config: BackendConfig,
}

impl StorageClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let operator = Self::build_operator(&config)?;
        Ok(Self { operator, config })
    }

    /// Use a prebuilt operator, keeping `config` for namespace semantics and locations.
    pub fn with_operator(config: BackendConfig, operator: Operator) -> Self {
        Self { operator, config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn namespace(&self) -> Namespace {
        self.config.namespace()
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn location(&self, key: &str) -> String {
        self.config.location(key)
    }

    fn build_operator(config: &BackendConfig) -> Result<Operator> {
        match config {
            BackendConfig::ObjectStorage(cfg) => {
                #[cfg(feature = "s3")]
                {
                    let mut builder = opendal::services::S3::default().bucket(&cfg.bucket);
                    if let Some(access_key_id) = &cfg.access_key_id {
                        builder = builder.access_key_id(access_key_id);
                    }
                    if let Some(secret_access_key) = &cfg.secret_access_key {
                        builder = builder.secret_access_key(secret_access_key);
                    }
                    if let Some(region) = &cfg.region {
                        builder = builder.region(region);
                    }
                    if let Some(endpoint) = &cfg.endpoint {
                        builder = builder.endpoint(endpoint);
                    }
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "s3"))]
                {
                    let _ = cfg;
                    Err(crate::error::Error::BackendUnavailable {
                        backend: "S3",
                        feature: "s3",
                    })
                }
            }
            BackendConfig::FileSync(cfg) => {
                #[cfg(feature = "webdav")]
                {
                    let (endpoint, root) = utils::path::split_dav_url(&cfg.url)?;
                    let builder = opendal::services::Webdav::default()
                        .endpoint(&endpoint)
                        .root(&root)
                        .username(&cfg.username)
                        .password(&cfg.password);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "webdav"))]
                {
                    let _ = cfg;
                    Err(crate::error::Error::BackendUnavailable {
                        backend: "WebDAV",
                        feature: "webdav",
                    })
                }
            }
        }
    }

    /// Upload one local file. Returns the final remote key.
    pub async fn upload(&self, local_path: &Path, remote_path: &str) -> Result<String> {
        log::debug!(
            "upload namespace={:?} local_path={} remote_path={}",
            self.namespace(),
            local_path.display(),
            remote_path
        );
        let uploader = OpenDalUploader::new(self.operator.clone());
        let report = wrap_err!(
            uploader.upload(local_path, remote_path).await,
            UploadFailed {
                local_path: local_path.display().to_string(),
                remote_path: self.location(remote_path)
            }
        )?;
        Ok(report.remote_path)
    }

    /// Download one remote object. Returns the number of bytes written.
    pub async fn download(&self, remote_path: &str, local_path: &Path) -> Result<u64> {
        log::debug!(
            "download namespace={:?} remote_path={} local_path={}",
            self.namespace(),
            remote_path,
            local_path.display()
        );
        let downloader = OpenDalDownloader::new(self.operator.clone());
        wrap_err!(
            downloader.download(remote_path, local_path).await,
            DownloadFailed {
                remote_path: self.location(remote_path),
                local_path: local_path.display().to_string()
            }
        )
    }

    pub async fn list(&self, path: &str) -> Result<Vec<StorageEntry>> {
        log::debug!("list namespace={:?} path={}", self.namespace(), path);
        let lister = OpenDalLister::new(self.operator.clone(), self.namespace());
        wrap_err!(
            lister.list(path).await,
            ListDirectoryFailed {
                path: self.location(path)
            }
        )
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        log::debug!("delete namespace={:?} path={}", self.namespace(), path);
        let deleter = OpenDalDeleter::new(self.operator.clone(), self.namespace());
        wrap_err!(
            deleter.delete(path).await,
            DeleteFailed {
                path: self.location(path)
            }
        )
    }

    /// Create a directory. Returns its normalized `/`-terminated path.
    pub async fn mkdir(&self, path: &str, parents: bool) -> Result<String> {
        log::debug!(
            "mkdir namespace={:?} path={} parents={}",
            self.namespace(),
            path,
            parents
        );
        let mkdirer = OpenDalMkdirer::new(self.operator.clone());
        mkdirer.mkdir(path, parents).await
    }
}
