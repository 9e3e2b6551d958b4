//! Result-valued storage API.
//!
//! Every call builds its own [`StorageClient`] from the adapter's config, runs
//! one operation and folds any error into an [`Outcome::Failure`].

use crate::error::Result;
use crate::storage::outcome::{Outcome, StatusMessage};
use crate::storage::{BackendConfig, StorageClient, StorageEntry};
use opendal::Operator;
use std::fmt;
use std::path::Path;

#[derive(Clone)]
enum Connector {
    /// Build a fresh operator from the config on every call.
    Lazy,
    /// Reuse one prebuilt operator for every call.
    Fixed(Operator),
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::Lazy => f.write_str("Lazy"),
            Connector::Fixed(_) => f.write_str("Fixed"),
        }
    }
}

/// Uniform upload/download/list/delete over either backend.
#[derive(Debug, Clone)]
pub struct StorageAdapter {
    config: BackendConfig,
    connector: Connector,
}

impl StorageAdapter {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            connector: Connector::Lazy,
        }
    }

    /// Run every call against `operator` instead of connecting from the config.
    ///
    /// The operator is shared across calls, so connection state (and any
    /// failure it carries) persists between them. Meant for embedding the
    /// adapter next to an existing [`Operator`] and for tests against local
    /// services; [`StorageAdapter::new`] connects afresh on each call.
    pub fn with_operator(config: BackendConfig, operator: Operator) -> Self {
        Self {
            config,
            connector: Connector::Fixed(operator),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn connect(&self) -> Result<StorageClient> {
        match &self.connector {
            Connector::Lazy => StorageClient::new(self.config.clone()),
            Connector::Fixed(operator) => Ok(StorageClient::with_operator(
                self.config.clone(),
                operator.clone(),
            )),
        }
    }

    pub async fn upload(&self, local_path: &Path, remote_path: &str) -> Outcome<StatusMessage> {
        let result: Result<StatusMessage> = async {
            let client = self.connect()?;
            let key = client.upload(local_path, remote_path).await?;
            Ok(format!(
                "Uploaded {} to {}",
                local_path.display(),
                client.location(&key)
            ))
        }
        .await;
        result.into()
    }

    pub async fn download(&self, remote_path: &str, local_path: &Path) -> Outcome<StatusMessage> {
        let result: Result<StatusMessage> = async {
            let client = self.connect()?;
            client.download(remote_path, local_path).await?;
            Ok(format!(
                "Downloaded {} to {}",
                client.location(remote_path),
                local_path.display()
            ))
        }
        .await;
        result.into()
    }

    pub async fn list(&self, path: &str) -> Outcome<Vec<StorageEntry>> {
        let result: Result<Vec<StorageEntry>> = async {
            let client = self.connect()?;
            client.list(path).await
        }
        .await;
        result.into()
    }

    pub async fn delete(&self, path: &str) -> Outcome<StatusMessage> {
        let result: Result<StatusMessage> = async {
            let client = self.connect()?;
            client.delete(path).await?;
            Ok(format!("Deleted {}", client.location(path)))
        }
        .await;
        result.into()
    }

    pub async fn mkdir(&self, path: &str, parents: bool) -> Outcome<StatusMessage> {
        let result: Result<StatusMessage> = async {
            let client = self.connect()?;
            let dir = client.mkdir(path, parents).await?;
            Ok(format!("Created directory {}", client.location(&dir)))
        }
        .await;
        result.into()
    }
}
