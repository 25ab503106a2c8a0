use serde_json::Value;
use tauri::State;

use crate::app::{invoke_timed, AppController, AppPaths, InvokeResult};
use crate::domain::{
    calculator, color, resolve_route as lookup_route, DomainError, Route, SettingsContent, SettingsScope,
    ROUTES,
};

fn to_message(e: DomainError) -> String {
    e.to_string()
}

// ==================== Settings Commands ====================

/// Get the cached content of a settings document.
#[tauri::command]
pub async fn get_settings(
    controller: State<'_, AppController>,
    scope: SettingsScope,
) -> Result<InvokeResult<SettingsContent>, String> {
    invoke_timed("get_settings", controller.settings(scope))
        .await
        .map_err(to_message)
}

/// Get a single setting.
#[tauri::command]
pub async fn get_setting(
    controller: State<'_, AppController>,
    scope: SettingsScope,
    key: String,
) -> Result<InvokeResult<Option<Value>>, String> {
    invoke_timed("get_setting", controller.setting(scope, &key))
        .await
        .map_err(to_message)
}

/// Update a setting in memory. Returns the previous value.
#[tauri::command]
pub async fn set_setting(
    controller: State<'_, AppController>,
    scope: SettingsScope,
    key: String,
    value: Value,
) -> Result<InvokeResult<Option<Value>>, String> {
    invoke_timed("set_setting", controller.set_setting(scope, &key, value))
        .await
        .map_err(to_message)
}

/// Persist a settings document.
#[tauri::command]
pub async fn save_settings(
    controller: State<'_, AppController>,
    scope: SettingsScope,
) -> Result<InvokeResult<()>, String> {
    invoke_timed("save_settings", controller.save_settings(scope))
        .await
        .map_err(to_message)
}

/// Reload a settings document from disk, dropping unsaved changes.
#[tauri::command]
pub async fn reload_settings(
    controller: State<'_, AppController>,
    scope: SettingsScope,
) -> Result<InvokeResult<SettingsContent>, String> {
    invoke_timed("reload_settings", controller.reload_settings(scope))
        .await
        .map_err(to_message)
}

/// Get application paths information.
#[tauri::command]
pub async fn get_paths(controller: State<'_, AppController>) -> Result<AppPaths, String> {
    Ok(controller.paths().await)
}

// ==================== Navigation ====================

#[tauri::command]
pub fn get_routes() -> Vec<Route> {
    ROUTES.to_vec()
}

/// Resolve a path against the route table. `None` for unknown paths.
#[tauri::command]
pub fn resolve_route(path: String) -> Option<Route> {
    lookup_route(&path).copied()
}

// ==================== Color Commands ====================

#[tauri::command]
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> (u8, u8, u8, u8) {
    color::rgb_to_cmyk(r, g, b)
}

#[tauri::command]
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    color::rgb_to_lab(r, g, b)
}

// ==================== Calculator Commands ====================

#[tauri::command]
pub fn calculate_sum(a: i32, b: i32) -> Result<i32, String> {
    calculator::sum(a, b).map_err(to_message)
}

#[tauri::command]
pub fn calculate_subtract(a: i32, b: i32) -> Result<i32, String> {
    calculator::subtract(a, b).map_err(to_message)
}

#[tauri::command]
pub fn calculate_multiply(a: i32, b: i32) -> Result<i32, String> {
    calculator::multiply(a, b).map_err(to_message)
}

#[tauri::command]
pub fn calculate_divide(a: i32, b: i32) -> Result<i32, String> {
    calculator::divide(a, b).map_err(to_message)
}

/// Runs on the blocking pool so long loops do not stall the IPC thread.
#[tauri::command]
pub async fn run_stress_test(iterations: i32) -> Result<i32, String> {
    tauri::async_runtime::spawn_blocking(move || calculator::stress_test(iterations))
        .await
        .map_err(|e| e.to_string())
}
