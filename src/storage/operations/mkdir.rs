// Directory creation operation trait and implementation
use crate::error::{Error, InvalidConfigSnafu, Result};
use opendal::{ErrorKind, Operator};
use snafu::ensure;

/// Trait for creating directories in storage.
pub trait Mkdirer {
    /// Create a directory in storage.
    ///
    /// # Arguments
    /// * `path` - Path of the directory to create
    /// * `parents` - Whether to create parent directories as needed
    ///
    /// # Returns
    /// * `Result<String>` - The normalized directory path
    async fn mkdir(&self, path: &str, parents: bool) -> Result<String>;
}

/// Implementation of Mkdirer for OpenDAL Operator.
pub struct OpenDalMkdirer {
    operator: Operator,
}

impl OpenDalMkdirer {
    /// Create a new mkdirer with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Normalize directory path by ensuring it ends with a slash.
    fn normalize_directory_path(&self, path: &str) -> String {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        }
    }

    async fn directory_exists(&self, path: &str) -> Result<bool> {
        match self.operator.stat(path).await {
            Ok(meta) => Ok(meta.mode().is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_single_directory(&self, path: &str) -> Result<()> {
        match self.operator.create_dir(path).await {
            Ok(_) => {
                log::debug!("created directory {path}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::debug!("directory already exists: {path}");
                Ok(())
            }
            Err(e) => Err(Error::DirectoryCreationFailed {
                path: path.to_string(),
                source: Box::new(Error::OpenDal { source: e }),
            }),
        }
    }

    async fn create_parent_directories(&self, path: &str) -> Result<()> {
        let components: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        for i in 1..components.len() {
            let current_path = components[..i].join("/") + "/";
            if !self.directory_exists(&current_path).await? {
                self.create_single_directory(&current_path).await?;
            }
        }

        self.create_single_directory(path).await
    }
}

impl Mkdirer for OpenDalMkdirer {
    async fn mkdir(&self, path: &str, parents: bool) -> Result<String> {
        let normalized_path = self.normalize_directory_path(path);
        ensure!(
            !normalized_path.is_empty(),
            InvalidConfigSnafu {
                message: "refusing to create the storage root".to_string(),
            }
        );

        if parents {
            self.create_parent_directories(&normalized_path).await?;
        } else {
            self.create_single_directory(&normalized_path).await?;
        }
        Ok(normalized_path)
    }
}
