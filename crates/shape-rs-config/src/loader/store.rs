//! Document stores the loader reads raw config bytes from.

use crate::ConfigError;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of raw config documents.
///
/// `Ok(None)` means the document does not exist, which the loader treats as
/// an absent config rather than a failure. Every other failure is returned
/// as an error and aborts the load.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the full document at `locator`.
    async fn read(&self, locator: &str) -> Result<Option<Vec<u8>>, ConfigError>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn read(&self, locator: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        (**self).read(locator).await
    }
}

/// Filesystem-backed store; locators are file paths.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentStore {
    /// Directory relative locators are resolved against.
    root: Option<PathBuf>,
}

impl FsDocumentStore {
    /// Store resolving relative locators against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store resolving relative locators against `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
        }
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(locator),
            None => PathBuf::from(locator),
        }
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn read(&self, locator: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        let path = self.resolve(locator);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!("read config document (path={}, bytes={})", path.display(), bytes.len());
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("config document missing (path={})", path.display());
                Ok(None)
            }
            Err(err) => Err(ConfigError::ReadFailed(err)),
        }
    }
}
