pub mod analysis;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod knowledge;
pub mod predictor;
pub mod report;
pub mod session;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("DermaScan starting v{}", config::APP_VERSION);
    tracing::info!(
        endpoint = %config::prediction_service_url(),
        "Prediction service configured"
    );

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(Arc::new(core_state::CoreState::new()))
        .invoke_handler(tauri::generate_handler![
            commands::health_check,
            commands::check_service_status,
            commands::analysis::select_image,
            commands::analysis::analyze_image,
            commands::analysis::get_analysis,
            commands::analysis::get_chart_data,
            commands::knowledge::list_diseases,
            commands::knowledge::get_disease_info,
            commands::report::export_report,
        ])
        .run(tauri::generate_context!())
        .expect("error while running DermaScan");
}
