//! Report export IPC command.

use std::sync::Arc;

use tauri::State;

use crate::config;
use crate::core_state::CoreState;
use crate::report::{self, ReportContent};

/// Composes the PDF report from the current result plus the selected image
/// and writes it to the exports directory. Returns the created file path.
///
/// An undecodable image degrades to a report without the image section; a
/// missing result is the only hard error.
#[tauri::command]
pub fn export_report(state: State<'_, Arc<CoreState>>) -> Result<String, String> {
    let (view, image_bytes) = state
        .report_inputs()
        .map_err(|e| e.to_string())?
        .ok_or("No analysis result to report yet")?;

    let content = ReportContent::from_view(&view);
    let pdf = report::render_pdf(&content, image_bytes.as_deref())
        .map_err(|e| format!("Report generation failed: {e}"))?;

    let path = report::export_report_to_file(&pdf, &config::exports_dir())
        .map_err(|e| e.to_string())?;

    tracing::info!(path = %path.display(), "Report exported");
    Ok(path.to_string_lossy().into_owned())
}
