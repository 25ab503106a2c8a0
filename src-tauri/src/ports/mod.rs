pub mod config_dir;

pub use config_dir::ConfigDirResolver;
