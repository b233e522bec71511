//! Prediction result shaping: top-class reduction and chart series building.
//!
//! Everything here is a pure function of the raw per-class probability map
//! returned by the prediction service plus the static knowledge base. The
//! map is fully replaced on every upload, so no merging logic exists.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::knowledge::{DiseaseCode, DiseaseInfoView};

/// Per-class probabilities as reported by the service. Values are expected in
/// the 0–100 range but are passed through as-is (no normalization, sum is not
/// guaranteed to be 100). Not all seven codes need be present.
pub type PredictionResult = HashMap<DiseaseCode, f64>;

/// Convert the service's raw string-keyed map into a `PredictionResult`.
/// Codes outside the fixed set are logged and dropped rather than failing
/// the whole response.
pub fn parse_predictions(raw: &HashMap<String, f64>) -> PredictionResult {
    let mut result = PredictionResult::with_capacity(raw.len());
    for (key, &value) in raw {
        match DiseaseCode::from_str(key) {
            Ok(code) => {
                result.insert(code, value);
            }
            Err(_) => {
                tracing::warn!(code = %key, "Ignoring unknown class in prediction response");
            }
        }
    }
    result
}

/// Highest-probability entry of a prediction result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopPrediction {
    pub code: DiseaseCode,
    pub probability: f64,
}

/// Returns the entry with maximal probability, or `None` for an empty map.
///
/// Ties are broken deterministically: the code that comes first in the fixed
/// `DiseaseCode::ALL` enumeration order wins. Only explicitly present entries
/// are eligible — an absent code never wins over a present one, whatever its
/// implied value.
pub fn derive_top_disease(predictions: &PredictionResult) -> Option<TopPrediction> {
    let mut top: Option<TopPrediction> = None;
    for code in DiseaseCode::ALL {
        let Some(&probability) = predictions.get(&code) else {
            continue;
        };
        match top {
            Some(current) if current.probability >= probability => {}
            _ => top = Some(TopPrediction { code, probability }),
        }
    }
    top
}

/// Chart-ready series over the full fixed code set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<DiseaseCode>,
    pub values: Vec<f64>,
}

/// Builds the bar-chart series: always exactly seven values in enumeration
/// order, substituting 0 for absent codes. Values are not normalized.
pub fn build_series(predictions: &PredictionResult) -> ChartSeries {
    let labels = DiseaseCode::ALL.to_vec();
    let values = DiseaseCode::ALL
        .iter()
        .map(|code| predictions.get(code).copied().unwrap_or(0.0))
        .collect();
    ChartSeries { labels, values }
}

/// Everything the result panel needs, derived from one `PredictionResult`.
/// Recomputed whenever the predictions change; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedView {
    pub top: TopPrediction,
    pub info: DiseaseInfoView,
    pub series: ChartSeries,
}

impl DerivedView {
    /// `None` when the prediction map is empty (no result to present —
    /// distinct from a failed request).
    pub fn from_predictions(predictions: &PredictionResult) -> Option<Self> {
        let top = derive_top_disease(predictions)?;
        Some(Self {
            top,
            info: DiseaseInfoView::for_code(top.code),
            series: build_series(predictions),
        })
    }
}

/// Formats a confidence value the way the report and the UI show it:
/// two decimal places, or the literal `N/A` placeholder when unavailable.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) => format!("{value:.2}%"),
        None => "N/A".to_string(),
    }
}
