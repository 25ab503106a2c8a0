use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::app::SettingsStore;
use crate::domain::{DomainError, SettingsContent, SettingsScope};
use crate::infrastructure::init_logging;
use crate::ports::ConfigDirResolver;

/// `logging` section of the global settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettings {
    level: String,
    file_logging: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Application paths information.
#[derive(Debug, Clone, Serialize)]
pub struct AppPaths {
    pub config_dir: String,
    pub logs_dir: String,
    pub user_settings_path: String,
    pub global_settings_path: String,
    pub image_cache_dir: String,
}

/// Application controller that orchestrates initialization and owns the settings store.
pub struct AppController {
    store: RwLock<SettingsStore>,
    config_dir: PathBuf,
    logs_dir: PathBuf,
    image_cache_dir: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize the application controller.
    /// This sets up the settings store, logging and the image cache directory.
    pub async fn init(resolver: &dyn ConfigDirResolver) -> Result<Self, DomainError> {
        // Step 1: Console logging so settings loading is visible
        let log_handle = init_logging();

        // Step 2: Config directory and both settings documents
        let store = SettingsStore::init(resolver).await?;
        let config_dir = store.directory().to_path_buf();
        let logs_dir = config_dir.join("logs");

        // Step 3: Level and file output from the global settings
        let logging: LoggingSettings = store.global_settings().get_as("logging")?.unwrap_or_default();
        let log_guard = match &log_handle {
            Some(handle) => handle.apply_settings(&logs_dir, &logging.level, logging.file_logging)?,
            None => None,
        };

        info!("Comparer starting up");

        // Step 4: Image cache directory
        let image_cache_dir = Self::image_cache_dir_from(&store, &config_dir)?;
        tokio::fs::create_dir_all(&image_cache_dir)
            .await
            .map_err(|e| DomainError::directory(&image_cache_dir, e))?;

        info!(
            config_dir = ?config_dir,
            image_cache_dir = ?image_cache_dir,
            "AppController initialized"
        );

        Ok(Self {
            store: RwLock::new(store),
            config_dir,
            logs_dir,
            image_cache_dir,
            _log_guard: log_guard,
        })
    }

    /// `imageCacheDir` from the global settings, or `<config>/cache/images` when unset.
    fn image_cache_dir_from(store: &SettingsStore, config_dir: &Path) -> Result<PathBuf, DomainError> {
        let configured: Option<String> = store.global_settings().get_as("imageCacheDir")?;
        Ok(match configured {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => config_dir.join("cache").join("images"),
        })
    }

    /// Copy of a settings document's cached content.
    pub async fn settings(&self, scope: SettingsScope) -> Result<SettingsContent, DomainError> {
        self.store.read().await.settings(scope).snapshot()
    }

    /// Get a single setting.
    pub async fn setting(&self, scope: SettingsScope, key: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.store.read().await.settings(scope).get(key)?.cloned())
    }

    /// Update a setting in memory. Use [`AppController::save_settings`] to persist.
    pub async fn set_setting(
        &self,
        scope: SettingsScope,
        key: &str,
        value: Value,
    ) -> Result<Option<Value>, DomainError> {
        self.store.write().await.settings_mut(scope).set(key, value)
    }

    /// Write a settings document's cached content to disk.
    pub async fn save_settings(&self, scope: SettingsScope) -> Result<(), DomainError> {
        self.store.read().await.settings(scope).persist().await?;
        info!(scope = %scope, "Settings saved");
        Ok(())
    }

    /// Discard in-memory changes and reload a document from disk.
    pub async fn reload_settings(&self, scope: SettingsScope) -> Result<SettingsContent, DomainError> {
        let mut store = self.store.write().await;
        let settings = store.settings_mut(scope);
        settings.reload().await?;
        settings.snapshot()
    }

    /// Get application paths information.
    pub async fn paths(&self) -> AppPaths {
        let store = self.store.read().await;
        AppPaths {
            config_dir: self.config_dir.to_string_lossy().to_string(),
            logs_dir: self.logs_dir.to_string_lossy().to_string(),
            user_settings_path: store.user_settings().path().to_string_lossy().to_string(),
            global_settings_path: store.global_settings().path().to_string_lossy().to_string(),
            image_cache_dir: self.image_cache_dir.to_string_lossy().to_string(),
        }
    }
}
