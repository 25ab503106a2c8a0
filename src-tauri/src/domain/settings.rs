use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level content of a settings document: JSON object keys to arbitrary values.
pub type SettingsContent = Map<String, Value>;

/// Which of the two settings documents an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsScope {
    /// Per-user preferences.
    User,
    /// Application-wide settings.
    Global,
}

impl SettingsScope {
    /// File name of the document under the config directory.
    pub fn filename(self) -> &'static str {
        match self {
            SettingsScope::User => "user_settings.json",
            SettingsScope::Global => "global_settings.json",
        }
    }
}

impl std::fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsScope::User => write!(f, "user"),
            SettingsScope::Global => write!(f, "global"),
        }
    }
}

/// In-memory cache of a settings document.
///
/// Content is only reachable once the document has been created or loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SettingsState {
    #[default]
    Uninitialized,
    Ready(SettingsContent),
}

impl SettingsState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SettingsState::Ready(_))
    }

    pub fn content(&self) -> Option<&SettingsContent> {
        match self {
            SettingsState::Ready(content) => Some(content),
            SettingsState::Uninitialized => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut SettingsContent> {
        match self {
            SettingsState::Ready(content) => Some(content),
            SettingsState::Uninitialized => None,
        }
    }
}
