use std::path::PathBuf;

use tracing::debug;

use crate::domain::DomainError;
use crate::ports::ConfigDirResolver;

/// Bundle identifier; also the name of the config directory.
pub const APP_IDENTIFIER: &str = "com.comparer.app";

/// Environment variable that overrides the resolved config directory.
pub const CONFIG_DIR_ENV: &str = "COMPARER_CONFIG_DIR";

/// Resolves the OS-specific application config directory.
/// - macOS: ~/Library/Application Support/com.comparer.app/
/// - Windows: %APPDATA%\com.comparer.app\
/// - Linux: ~/.config/com.comparer.app/
#[derive(Debug, Clone, Default)]
pub struct PlatformConfigDir;

impl ConfigDirResolver for PlatformConfigDir {
    fn resolve(&self) -> Result<PathBuf, DomainError> {
        #[cfg(any(target_os = "macos", target_os = "windows", target_os = "linux"))]
        {
            dirs::config_dir()
                .map(|p| p.join(APP_IDENTIFIER))
                .ok_or_else(|| {
                    DomainError::directory(APP_IDENTIFIER, "could not find application config directory")
                })
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            Err(DomainError::Config("Unsupported operating system".to_string()))
        }
    }
}

/// Uses an explicit directory instead of the platform default.
#[derive(Debug, Clone)]
pub struct FixedConfigDir {
    path: PathBuf,
}

impl FixedConfigDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigDirResolver for FixedConfigDir {
    fn resolve(&self) -> Result<PathBuf, DomainError> {
        Ok(self.path.clone())
    }
}

/// Pick the resolver for this process: `COMPARER_CONFIG_DIR` when set, the
/// platform directory otherwise.
pub fn resolver_from_env() -> Result<Box<dyn ConfigDirResolver>, DomainError> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(value) if value.is_empty() => Err(DomainError::Config(format!("{} is set but empty", CONFIG_DIR_ENV))),
        Some(value) => {
            debug!(path = ?value, "Using config directory from environment");
            Ok(Box::new(FixedConfigDir::new(value)))
        }
        None => Ok(Box::new(PlatformConfigDir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dir_ends_with_identifier() {
        if let Ok(path) = PlatformConfigDir.resolve() {
            assert!(path.ends_with(APP_IDENTIFIER));
        }
    }

    #[test]
    fn test_fixed_dir_resolves_as_given() {
        let resolver = FixedConfigDir::new("/tmp/comparer-fixed");
        assert_eq!(resolver.resolve().unwrap(), PathBuf::from("/tmp/comparer-fixed"));
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_nested_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("a").join("b").join("config");
        let resolver = FixedConfigDir::new(&target);

        resolver.ensure_exists(&target).await.unwrap();
        assert!(target.is_dir());

        // Second call is a no-op.
        resolver.ensure_exists(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_exists_fails_under_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let target = blocker.join("config");

        let err = FixedConfigDir::new(&target)
            .ensure_exists(&target)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Directory { .. }));
    }

    #[tokio::test]
    async fn test_ensure_exists_rejects_regular_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("config");
        std::fs::write(&target, "x").unwrap();

        let err = FixedConfigDir::new(&target)
            .ensure_exists(&target)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        assert!(matches!(err, DomainError::Directory { path, .. } if path == target));
    }
}
