pub mod analysis;
pub mod knowledge;
pub mod report;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::predictor::{ClassifierClient, PredictionClient};

/// Health check IPC command — verifies backend is running
#[tauri::command]
pub fn health_check() -> String {
    tracing::debug!("Health check called");
    "ok".to_string()
}

/// Prediction-service availability for the frontend status indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Whether the prediction service answered at all.
    pub reachable: bool,
    /// Base URL being probed.
    pub endpoint: String,
    /// Human-readable status summary.
    pub summary: String,
}

/// Proactive check of prediction-service availability.
///
/// Called by the frontend on app load to show the user whether analysis is
/// functional before they upload anything. Uses a short probe timeout so the
/// indicator never hangs the UI.
#[tauri::command]
pub fn check_service_status() -> ServiceStatus {
    let endpoint = config::prediction_service_url();
    let client = PredictionClient::new(&endpoint, 5);

    let reachable = client
        .health_check()
        .map(|h| h.reachable)
        .unwrap_or(false);

    let summary = if reachable {
        format!("Prediction service ready at {endpoint}")
    } else {
        format!("Prediction service not reachable at {endpoint} — start the backend and retry")
    };

    ServiceStatus {
        reachable,
        endpoint,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_returns_ok() {
        assert_eq!(health_check(), "ok");
    }

    #[test]
    fn service_status_serializes() {
        let status = ServiceStatus {
            reachable: false,
            endpoint: "http://localhost:5000".to_string(),
            summary: "Prediction service not reachable".to_string(),
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"reachable\":false"));
        assert!(json.contains("\"endpoint\":\"http://localhost:5000\""));
    }
}
