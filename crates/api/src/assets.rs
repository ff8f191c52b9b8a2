//! On-disk store for tour image assets.
//!
//! Assets live flat in one directory under names produced by
//! [`generate_asset_name`]. Rows reference them by name only; the row and
//! the file are written separately, never in one transaction.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tourbook_core::image::{generate_asset_name, is_generated_asset_name};

/// Directory-backed image asset store.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the asset directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under a freshly generated name and return that name.
    ///
    /// Never overwrites an existing file.
    pub async fn save(&self, ext: &str, bytes: &[u8]) -> io::Result<String> {
        self.ensure_dir().await?;

        let name = generate_asset_name(ext);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.root.join(&name))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(asset = %name, size = bytes.len(), "Asset written");
        Ok(name)
    }

    /// Remove an asset. A file that is already gone counts as removed.
    pub async fn remove(&self, name: &str) -> io::Result<()> {
        let path = self.checked_path(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(asset = %name, "Asset removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Whether an asset with this name is present on disk.
    pub async fn exists(&self, name: &str) -> bool {
        match self.checked_path(name) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    fn checked_path(&self, name: &str) -> io::Result<PathBuf> {
        if !is_generated_asset_name(name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{name}' is not a managed asset name"),
            ));
        }
        Ok(self.root.join(name))
    }
}
