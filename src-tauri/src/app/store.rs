use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::settings_file::{parse_document, SettingsFile};
use crate::domain::{DomainError, SettingsContent, SettingsScope};
use crate::ports::ConfigDirResolver;

const DEFAULT_USER_SETTINGS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/settings/userSettings.json"));
const DEFAULT_GLOBAL_SETTINGS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/settings/globalSettings.json"));

/// Bundled defaults for a scope, used to seed the document on first run.
pub fn default_settings(scope: SettingsScope) -> Result<SettingsContent, DomainError> {
    let (name, text) = match scope {
        SettingsScope::User => ("userSettings.json", DEFAULT_USER_SETTINGS),
        SettingsScope::Global => ("globalSettings.json", DEFAULT_GLOBAL_SETTINGS),
    };
    parse_document(Path::new(name), text)
}

/// Owns the user and global settings documents.
///
/// Only obtainable through [`SettingsStore::init`], which returns after both
/// documents are created or loaded.
#[derive(Debug)]
pub struct SettingsStore {
    directory: PathBuf,
    user_settings: SettingsFile,
    global_settings: SettingsFile,
}

impl SettingsStore {
    /// Resolve and create the config directory, then create or load both
    /// settings documents with the bundled defaults.
    pub async fn init(resolver: &dyn ConfigDirResolver) -> Result<Self, DomainError> {
        Self::init_with_defaults(
            resolver,
            default_settings(SettingsScope::User)?,
            default_settings(SettingsScope::Global)?,
        )
        .await
    }

    /// Like [`SettingsStore::init`] with caller-supplied seed content.
    pub async fn init_with_defaults(
        resolver: &dyn ConfigDirResolver,
        user_defaults: SettingsContent,
        global_defaults: SettingsContent,
    ) -> Result<Self, DomainError> {
        let directory = resolver.resolve()?;
        resolver.ensure_exists(&directory).await?;

        let (user_settings, global_settings) =
            Self::check_settings_files(&directory, &user_defaults, &global_defaults).await?;

        info!(directory = ?directory, "SettingsStore initialized");

        Ok(Self {
            directory,
            user_settings,
            global_settings,
        })
    }

    /// Create or load both documents concurrently. Returns once both are done;
    /// the first failure is returned.
    async fn check_settings_files(
        directory: &Path,
        user_defaults: &SettingsContent,
        global_defaults: &SettingsContent,
    ) -> Result<(SettingsFile, SettingsFile), DomainError> {
        let mut user_settings = SettingsFile::new(directory, SettingsScope::User.filename());
        let mut global_settings = SettingsFile::new(directory, SettingsScope::Global.filename());

        tokio::try_join!(
            user_settings.create_if_not_exists(user_defaults),
            global_settings.create_if_not_exists(global_defaults),
        )?;

        Ok((user_settings, global_settings))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn user_settings(&self) -> &SettingsFile {
        &self.user_settings
    }

    pub fn global_settings(&self) -> &SettingsFile {
        &self.global_settings
    }

    pub fn user_settings_mut(&mut self) -> &mut SettingsFile {
        &mut self.user_settings
    }

    pub fn global_settings_mut(&mut self) -> &mut SettingsFile {
        &mut self.global_settings
    }

    pub fn settings(&self, scope: SettingsScope) -> &SettingsFile {
        match scope {
            SettingsScope::User => &self.user_settings,
            SettingsScope::Global => &self.global_settings,
        }
    }

    pub fn settings_mut(&mut self, scope: SettingsScope) -> &mut SettingsFile {
        match scope {
            SettingsScope::User => &mut self.user_settings,
            SettingsScope::Global => &mut self.global_settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedConfigDir;
    use serde_json::{json, Value};

    fn object(value: Value) -> SettingsContent {
        match value {
            Value::Object(map) => map,
            _ => panic!("test content must be an object"),
        }
    }

    #[test]
    fn test_bundled_defaults_parse() {
        let user = default_settings(SettingsScope::User).unwrap();
        let global = default_settings(SettingsScope::Global).unwrap();

        assert!(user.contains_key("theme"));
        assert!(global.contains_key("logging"));
    }

    #[tokio::test]
    async fn test_init_creates_directory_and_both_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_dir = temp_dir.path().join("config").join("com.comparer.app");
        let resolver = FixedConfigDir::new(&config_dir);

        let store = SettingsStore::init(&resolver).await.unwrap();

        assert_eq!(store.directory(), config_dir.as_path());
        assert!(config_dir.join("user_settings.json").exists());
        assert!(config_dir.join("global_settings.json").exists());

        let user_defaults = default_settings(SettingsScope::User).unwrap();
        let global_defaults = default_settings(SettingsScope::Global).unwrap();
        assert_eq!(store.user_settings().get_content().await.unwrap(), user_defaults);
        assert_eq!(store.global_settings().get_content().await.unwrap(), global_defaults);

        assert!(store.user_settings().is_loaded());
        assert!(store.global_settings().is_loaded());
        assert_eq!(store.user_settings().get("theme").unwrap(), user_defaults.get("theme"));
        assert_eq!(
            store.global_settings().get("logging").unwrap(),
            global_defaults.get("logging")
        );
    }

    #[tokio::test]
    async fn test_existing_file_wins_over_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("user_settings.json"), r#"{"theme":"dark"}"#).unwrap();

        let store = SettingsStore::init_with_defaults(
            &FixedConfigDir::new(temp_dir.path()),
            object(json!({ "theme": "light" })),
            object(json!({ "level": "info" })),
        )
        .await
        .unwrap();

        assert_eq!(store.user_settings().get("theme").unwrap(), Some(&json!("dark")));
        assert_eq!(store.global_settings().get("level").unwrap(), Some(&json!("info")));
    }

    #[tokio::test]
    async fn test_malformed_global_fails_init() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("global_settings.json"), "{\"level\": ").unwrap();

        let result = SettingsStore::init(&FixedConfigDir::new(temp_dir.path())).await;

        assert!(matches!(result, Err(DomainError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_scope_accessors_and_mutation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::init(&FixedConfigDir::new(temp_dir.path()))
            .await
            .unwrap();

        store
            .settings_mut(SettingsScope::User)
            .set("theme", json!("dark"))
            .unwrap();
        assert_eq!(store.user_settings().get("theme").unwrap(), Some(&json!("dark")));
        assert_eq!(store.settings(SettingsScope::Global).filename(), "global_settings.json");

        // Memory only until persisted.
        let on_disk = store.user_settings().get_content().await.unwrap();
        assert_ne!(on_disk.get("theme"), Some(&json!("dark")));

        store.user_settings().persist().await.unwrap();
        let reopened = SettingsStore::init(&FixedConfigDir::new(temp_dir.path()))
            .await
            .unwrap();
        assert_eq!(reopened.user_settings().get("theme").unwrap(), Some(&json!("dark")));
    }

    #[tokio::test]
    async fn test_config_path_that_is_a_file_fails_init() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("com.comparer.app");
        std::fs::write(&config_path, "x").unwrap();

        let result = SettingsStore::init(&FixedConfigDir::new(&config_path)).await;

        assert!(matches!(result, Err(DomainError::Directory { .. })));
        assert!(!config_path.join("user_settings.json").exists());
    }
}
