use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::domain::{DomainError, SettingsContent, SettingsState};

/// One JSON settings document under the config directory, cached in memory.
///
/// Mutation through [`SettingsFile::set`] only touches the cache; call
/// [`SettingsFile::persist`] to write it back.
#[derive(Debug)]
pub struct SettingsFile {
    base_dir: PathBuf,
    filename: String,
    state: SettingsState,
}

impl SettingsFile {
    /// Create a handle for `<base_dir>/<filename>`. Does not touch disk.
    pub fn new(base_dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            filename: filename.into(),
            state: SettingsState::Uninitialized,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(&self.filename)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_ready()
    }

    /// Write `defaults` as the initial document if the file is missing,
    /// otherwise load the existing file. Either way the cache is populated.
    pub async fn create_if_not_exists(&mut self, defaults: &SettingsContent) -> Result<(), DomainError> {
        let path = self.path();

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::file_creation(&path, e))?;

        if exists {
            debug!(path = ?path, "Settings file exists, loading");
            self.state = SettingsState::Ready(self.get_content().await?);
            info!(path = ?path, "Settings loaded");
        } else {
            let text = serde_json::to_string_pretty(defaults)?;
            write_atomically(&path, &self.tmp_path(), &text)
                .await
                .map_err(|e| DomainError::file_creation(&path, e))?;

            self.state = SettingsState::Ready(defaults.clone());
            info!(path = ?path, "Settings file created from defaults");
        }

        Ok(())
    }

    /// Read and parse the document from disk. The cache is left untouched.
    pub async fn get_content(&self) -> Result<SettingsContent, DomainError> {
        let path = self.path();
        let bytes = fs::read(&path).await?;
        let text = String::from_utf8(bytes).map_err(|e| DomainError::parse(&path, e))?;
        parse_document(&path, &text)
    }

    /// Replace the cache with the current on-disk content.
    pub async fn reload(&mut self) -> Result<(), DomainError> {
        self.state = SettingsState::Ready(self.get_content().await?);
        debug!(path = ?self.path(), "Settings reloaded");
        Ok(())
    }

    /// Write the cached content back to disk.
    pub async fn persist(&self) -> Result<(), DomainError> {
        let text = self.serialize()?;
        let path = self.path();

        write_atomically(&path, &self.tmp_path(), &text).await?;

        info!(path = ?path, "Settings saved");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<&Value>, DomainError> {
        Ok(self.content()?.get(key))
    }

    /// Deserialize a single field into `T`. Missing keys yield `Ok(None)`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let Some(value) = self.get(key)? else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| DomainError::InvalidSetting {
                path: self.path(),
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Set a field in memory only. Returns the previous value.
    pub fn set(&mut self, key: &str, value: Value) -> Result<Option<Value>, DomainError> {
        Ok(self.content_mut()?.insert(key.to_string(), value))
    }

    pub fn keys(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.content()?.keys().cloned().collect())
    }

    pub fn values(&self) -> Result<Vec<Value>, DomainError> {
        Ok(self.content()?.values().cloned().collect())
    }

    pub fn entries(&self) -> Result<Vec<(String, Value)>, DomainError> {
        Ok(self
            .content()?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Owned copy of the cached content.
    pub fn snapshot(&self) -> Result<SettingsContent, DomainError> {
        Ok(self.content()?.clone())
    }

    /// Pretty-printed JSON (2-space indent) of the cached content.
    pub fn serialize(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(self.content()?)?)
    }

    fn content(&self) -> Result<&SettingsContent, DomainError> {
        match self.state.content() {
            Some(content) => Ok(content),
            None => Err(DomainError::SettingsNotLoaded(self.filename.clone())),
        }
    }

    fn content_mut(&mut self) -> Result<&mut SettingsContent, DomainError> {
        match self.state.content_mut() {
            Some(content) => Ok(content),
            None => Err(DomainError::SettingsNotLoaded(self.filename.clone())),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        self.base_dir.join(format!(".{}.tmp", self.filename))
    }
}

/// Write `text` to `tmp_path`, sync it, then rename it over `path`.
/// The document at `path` is either the old one or the complete new one.
async fn write_atomically(path: &Path, tmp_path: &Path, text: &str) -> std::io::Result<()> {
    let result: std::io::Result<()> = async {
        let mut file = fs::File::create(tmp_path).await?;
        file.write_all(text.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(tmp_path, path).await
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(tmp_path).await;
    }
    result
}

/// Parse a settings document. The top-level value must be a JSON object.
pub fn parse_document(path: &Path, text: &str) -> Result<SettingsContent, DomainError> {
    match serde_json::from_str::<Value>(text).map_err(|e| DomainError::parse(path, e))? {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::parse(
            path,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
