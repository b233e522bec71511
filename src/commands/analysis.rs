//! Upload/analyze IPC commands.
//!
//! `select_image` applies the client-side MIME filter and reads the file;
//! `analyze_image` drives the full cycle against the configured prediction
//! service. Both return the state snapshot the frontend renders from.

use std::path::PathBuf;
use std::sync::Arc;

use tauri::State;

use crate::analysis::ChartSeries;
use crate::core_state::CoreState;
use crate::predictor::PredictionClient;
use crate::session::{AnalysisSnapshot, SelectedImage};

/// Registers the picked file as the current image. Moves the machine to
/// `image_selected` from any phase, clearing prior results and errors.
#[tauri::command]
pub fn select_image(
    path: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<AnalysisSnapshot, String> {
    let path = PathBuf::from(path);

    // Client-side MIME filter: only image/* passes, matching the picker.
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err("Please upload a valid image file.".into());
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or("Invalid file path")?;

    let bytes =
        std::fs::read(&path).map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
    if bytes.is_empty() {
        return Err("Selected file is empty".into());
    }

    state
        .select_image(SelectedImage {
            path,
            file_name,
            bytes,
        })
        .map_err(|e| e.to_string())
}

/// Uploads the selected image to the prediction service and stores the
/// outcome. A trigger while a request is pending is a no-op returning the
/// current snapshot; a trigger with no image selected fails with a
/// validation message and sends nothing.
#[tauri::command]
pub fn analyze_image(state: State<'_, Arc<CoreState>>) -> Result<AnalysisSnapshot, String> {
    let client = PredictionClient::from_config();
    state.run_analysis(&client).map_err(|e| e.to_string())
}

/// Current interaction state, for frontend re-sync.
#[tauri::command]
pub fn get_analysis(state: State<'_, Arc<CoreState>>) -> Result<AnalysisSnapshot, String> {
    state.snapshot().map_err(|e| e.to_string())
}

/// Chart series over the current predictions; `None` means nothing to chart
/// (no results yet, or an empty prediction map).
#[tauri::command]
pub fn get_chart_data(
    state: State<'_, Arc<CoreState>>,
) -> Result<Option<ChartSeries>, String> {
    state.chart_series().map_err(|e| e.to_string())
}
