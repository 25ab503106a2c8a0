pub mod controller;
pub mod invoke;
pub mod store;

pub use controller::{AppController, AppPaths};
pub use invoke::{invoke_timed, InvokeResult};
pub use store::SettingsStore;
