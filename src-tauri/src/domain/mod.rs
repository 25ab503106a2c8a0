pub mod calculator;
pub mod color;
pub mod error;
pub mod route;
pub mod settings;

pub use error::DomainError;
pub use route::{resolve_route, Route, View, ROUTES};
pub use settings::{SettingsContent, SettingsScope, SettingsState};
