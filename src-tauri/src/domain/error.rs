use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors for Comparer.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config directory error at {path:?}: {message}")]
    Directory { path: PathBuf, message: String },

    #[error("Could not create settings file {path:?}: {message}")]
    FileCreation { path: PathBuf, message: String },

    #[error("Invalid settings document {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for `{key}` in {path:?}: {message}")]
    InvalidSetting {
        path: PathBuf,
        key: String,
        message: String,
    },

    #[error("Settings file {0} has not been loaded")]
    SettingsNotLoaded(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl DomainError {
    pub(crate) fn directory(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        DomainError::Directory {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn file_creation(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        DomainError::FileCreation {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        DomainError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
