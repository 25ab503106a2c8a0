pub mod config_dir;
pub mod settings_file;

pub use config_dir::{resolver_from_env, FixedConfigDir, PlatformConfigDir};
pub use settings_file::SettingsFile;
