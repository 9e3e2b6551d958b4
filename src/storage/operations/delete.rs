// Delete operation trait and implementation
use crate::error::{InvalidConfigSnafu, Result};
use crate::storage::operations::Namespace;
use crate::storage::utils::error::remote_error;
use crate::storage::utils::path::{ensure_trailing_slash, normalize_remote_path};
use opendal::Operator;
use snafu::ensure;

/// Trait for deleting a single remote object or directory.
pub trait Deleter {
    /// Delete one path from storage.
    ///
    /// # Arguments
    /// * `path` - Key or path to delete
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn delete(&self, path: &str) -> Result<()>;
}

/// Implementation of Deleter for OpenDAL Operator.
pub struct OpenDalDeleter {
    operator: Operator,
    namespace: Namespace,
}

impl OpenDalDeleter {
    /// Create a new deleter with the given OpenDAL operator.
    pub fn new(operator: Operator, namespace: Namespace) -> Self {
        Self {
            operator,
            namespace,
        }
    }
}

impl Deleter for OpenDalDeleter {
    async fn delete(&self, path: &str) -> Result<()> {
        let key = normalize_remote_path(path);
        ensure!(
            !key.trim_end_matches('/').is_empty(),
            InvalidConfigSnafu {
                message: "refusing to delete the storage root".to_string(),
            }
        );

        match self.namespace {
            // Object stores delete idempotently: a missing key is not an error.
            Namespace::Flat => self.operator.delete(&key).await?,
            Namespace::Hierarchical => {
                let meta = self
                    .operator
                    .stat(&key)
                    .await
                    .map_err(|e| remote_error(e, path))?;
                if meta.mode().is_dir() {
                    self.operator.remove_all(&ensure_trailing_slash(&key)).await?;
                } else {
                    self.operator.delete(&key).await?;
                }
            }
        }
        log::debug!("deleted {key}");
        Ok(())
    }
}
