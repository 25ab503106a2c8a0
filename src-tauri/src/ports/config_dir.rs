use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::DomainError;

/// Locates the application configuration directory.
#[async_trait]
pub trait ConfigDirResolver: Send + Sync {
    /// Resolve the platform-appropriate config directory. Does not touch disk.
    fn resolve(&self) -> Result<PathBuf, DomainError>;

    /// Create `path` and any missing parents if it does not exist yet.
    async fn ensure_exists(&self, path: &Path) -> Result<(), DomainError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => {
                debug!(path = ?path, "Config directory already exists");
                return Ok(());
            }
            Ok(_) => return Err(DomainError::directory(path, "exists but is not a directory")),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(DomainError::directory(path, e)),
        }

        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| DomainError::directory(path, e))?;
        info!(path = ?path, "Config directory created");
        Ok(())
    }
}
