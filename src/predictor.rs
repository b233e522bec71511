//! HTTP client for the remote skin-lesion prediction service.
//!
//! One endpoint: `POST {base}/predict` with multipart form data carrying the
//! image under the `file` field. Success responses hold a `predictions` map
//! of class code to probability; failure responses may carry an `error`
//! string which is surfaced to the user verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{self, PredictionResult};

/// Seam for the prediction service so command orchestration is testable
/// without a network.
pub trait ClassifierClient: Send + Sync {
    /// Uploads one image and returns the per-class probability map.
    fn classify(&self, file_name: &str, bytes: &[u8]) -> Result<PredictionResult, PredictError>;

    /// Cheap reachability probe of the service base URL.
    fn health_check(&self) -> Result<ServiceHealth, PredictError>;
}

/// Errors from the prediction service boundary.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Cannot reach prediction service at {0}")]
    Connection(String),
    #[error("Prediction request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    /// Service rejected the request; `message` is its `error` field when
    /// present, else a generic fallback.
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("Unexpected response from prediction service: {0}")]
    ResponseParsing(String),
}

/// Reachability report for the frontend status indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub reachable: bool,
    pub base_url: String,
}

/// Blocking HTTP client for the prediction service.
pub struct PredictionClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

const GENERIC_SERVICE_ERROR: &str = "Prediction service could not process the image";

impl PredictionClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client for the configured service endpoint with a 60s upload timeout.
    pub fn from_config() -> Self {
        Self::new(&crate::config::prediction_service_url(), 60)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> PredictError {
        if e.is_connect() {
            PredictError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            PredictError::Timeout(self.timeout_secs)
        } else {
            PredictError::HttpClient(e.to_string())
        }
    }
}

/// Success body of `POST /predict`. The map may be absent or partial;
/// an absent map is treated as empty.
#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: HashMap<String, f64>,
}

/// Failure body of `POST /predict`.
#[derive(Deserialize)]
struct PredictErrorResponse {
    error: Option<String>,
}

impl ClassifierClient for PredictionClient {
    fn classify(&self, file_name: &str, bytes: &[u8]) -> Result<PredictionResult, PredictError> {
        let url = format!("{}/predict", self.base_url);

        let mime = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let part = reqwest::blocking::multipart::Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(&mime)
            .map_err(|e| PredictError::HttpClient(e.to_string()))?;
        let form = reqwest::blocking::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<PredictErrorResponse>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
            return Err(PredictError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: PredictResponse = response
            .json()
            .map_err(|e| PredictError::ResponseParsing(e.to_string()))?;

        Ok(analysis::parse_predictions(&parsed.predictions))
    }

    fn health_check(&self) -> Result<ServiceHealth, PredictError> {
        // Any HTTP response counts as reachable; the service has no
        // dedicated health route, so a 404 on the base URL is fine.
        let reachable = match self.client.get(&self.base_url).send() {
            Ok(_) => true,
            Err(e) if e.is_connect() || e.is_timeout() => false,
            Err(e) => return Err(PredictError::HttpClient(e.to_string())),
        };
        Ok(ServiceHealth {
            reachable,
            base_url: self.base_url.clone(),
        })
    }
}

/// Mock classifier for tests — returns a configurable outcome and counts
/// how many classify calls were made.
pub struct MockClassifier {
    outcome: std::sync::Mutex<Result<PredictionResult, String>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockClassifier {
    pub fn returning(predictions: PredictionResult) -> Self {
        Self {
            outcome: std::sync::Mutex::new(Ok(predictions)),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: std::sync::Mutex::new(Err(message.to_string())),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl ClassifierClient for MockClassifier {
    fn classify(&self, _file_name: &str, _bytes: &[u8]) -> Result<PredictionResult, PredictError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &*self.outcome.lock().expect("mock outcome lock") {
            Ok(predictions) => Ok(predictions.clone()),
            Err(message) => Err(PredictError::Service {
                status: 400,
                message: message.clone(),
            }),
        }
    }

    fn health_check(&self) -> Result<ServiceHealth, PredictError> {
        Ok(ServiceHealth {
            reachable: true,
            base_url: "mock://classifier".to_string(),
        })
    }
}
