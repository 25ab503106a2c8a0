#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
#[cfg(feature = "desktop")]
mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use app::AppController;
    use commands::{
        // Settings commands
        get_paths, get_setting, get_settings, reload_settings, save_settings, set_setting,
        // Navigation
        get_routes, resolve_route,
        // Color commands
        rgb_to_cmyk, rgb_to_lab,
        // Calculator commands
        calculate_divide, calculate_multiply, calculate_subtract, calculate_sum, run_stress_test,
    };

    // Settings must be loaded before the shell starts
    let controller = match adapters::resolver_from_env().and_then(|resolver| {
        tauri::async_runtime::block_on(AppController::init(resolver.as_ref()))
    }) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(controller)
        .invoke_handler(tauri::generate_handler![
            // Settings commands
            get_settings,
            get_setting,
            set_setting,
            save_settings,
            reload_settings,
            get_paths,
            // Navigation
            get_routes,
            resolve_route,
            // Color commands
            rgb_to_cmyk,
            rgb_to_lab,
            // Calculator commands
            calculate_sum,
            calculate_subtract,
            calculate_multiply,
            calculate_divide,
            run_stress_test,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
