//! Upload/analyze interaction state machine.
//!
//! Modeled as one tagged variant per phase so illegal combinations (an
//! analysis with no selected image, results alongside an error) are
//! unrepresentable. Selecting a file from any phase restarts the cycle and
//! clears prior results; a resolution arriving after the machine has left
//! `Analyzing` is stale and dropped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::{DerivedView, PredictionResult};

/// The user's currently selected image, held across the whole cycle.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Interaction phases. Transitions happen only through the methods below.
#[derive(Debug)]
pub enum Analysis {
    Idle,
    ImageSelected { image: SelectedImage },
    Analyzing { image: SelectedImage },
    ResultsReady { image: SelectedImage, predictions: PredictionResult },
    Failed { image: SelectedImage, message: String },
}

/// Rejected transitions, surfaced to the user as validation messages.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("Please upload an image first.")]
    NoImageSelected,
    #[error("Analysis already in progress")]
    AnalysisInProgress,
}

impl Analysis {
    /// New file selection: valid from every phase, clears prior
    /// results/errors.
    pub fn select_image(&mut self, image: SelectedImage) {
        *self = Analysis::ImageSelected { image };
    }

    /// Move to `Analyzing` and hand back the image to upload.
    /// No-op errors: nothing selected, or a request already pending.
    pub fn begin(&mut self) -> Result<SelectedImage, TransitionError> {
        match self {
            Analysis::Idle => Err(TransitionError::NoImageSelected),
            Analysis::Analyzing { .. } => Err(TransitionError::AnalysisInProgress),
            Analysis::ImageSelected { image }
            | Analysis::ResultsReady { image, .. }
            | Analysis::Failed { image, .. } => {
                let image = image.clone();
                *self = Analysis::Analyzing { image: image.clone() };
                Ok(image)
            }
        }
    }

    /// Successful resolution. Applied only from `Analyzing`; returns whether
    /// the result was accepted (a stale completion is dropped).
    pub fn complete(&mut self, predictions: PredictionResult) -> bool {
        match self {
            Analysis::Analyzing { image } => {
                let image = image.clone();
                *self = Analysis::ResultsReady { image, predictions };
                true
            }
            _ => {
                tracing::debug!("Dropping stale prediction result");
                false
            }
        }
    }

    /// Failed resolution. Predictions are cleared, not left stale.
    pub fn fail(&mut self, message: String) -> bool {
        match self {
            Analysis::Analyzing { image } => {
                let image = image.clone();
                *self = Analysis::Failed { image, message };
                true
            }
            _ => {
                tracing::debug!("Dropping stale prediction failure");
                false
            }
        }
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        match self {
            Analysis::Idle => None,
            Analysis::ImageSelected { image }
            | Analysis::Analyzing { image }
            | Analysis::ResultsReady { image, .. }
            | Analysis::Failed { image, .. } => Some(image),
        }
    }

    pub fn predictions(&self) -> Option<&PredictionResult> {
        match self {
            Analysis::ResultsReady { predictions, .. } => Some(predictions),
            _ => None,
        }
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Analysis::Idle
    }
}

/// Phase discriminant for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    ImageSelected,
    Analyzing,
    ResultsReady,
    Failed,
}

/// Serializable projection of the current state for the UI.
///
/// `result` is present only when there are derivable predictions: a completed
/// request with an empty map yields `results_ready` with no result and no
/// error — distinct from `failed`, which always carries a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub error: Option<String>,
    pub result: Option<DerivedView>,
}

impl AnalysisSnapshot {
    pub fn of(state: &Analysis) -> Self {
        let phase = match state {
            Analysis::Idle => Phase::Idle,
            Analysis::ImageSelected { .. } => Phase::ImageSelected,
            Analysis::Analyzing { .. } => Phase::Analyzing,
            Analysis::ResultsReady { .. } => Phase::ResultsReady,
            Analysis::Failed { .. } => Phase::Failed,
        };
        let error = match state {
            Analysis::Failed { message, .. } => Some(message.clone()),
            _ => None,
        };
        let result = state
            .predictions()
            .and_then(DerivedView::from_predictions);
        Self {
            phase,
            file_name: state.image().map(|i| i.file_name.clone()),
            error,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::DiseaseCode;

    fn image(name: &str) -> SelectedImage {
        SelectedImage {
            path: PathBuf::from(format!("/photos/{name}")),
            file_name: name.to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn mel_predictions() -> PredictionResult {
        let mut p = PredictionResult::new();
        p.insert(DiseaseCode::Mel, 87.5);
        p
    }

    #[test]
    fn analyze_without_image_is_rejected() {
        let mut state = Analysis::default();
        let err = state.begin().unwrap_err();
        assert_eq!(err, TransitionError::NoImageSelected);
        assert!(matches!(state, Analysis::Idle));
    }

    #[test]
    fn select_then_analyze_then_results() {
        let mut state = Analysis::default();
        state.select_image(image("lesion.jpg"));
        assert!(matches!(state, Analysis::ImageSelected { .. }));

        let img = state.begin().unwrap();
        assert_eq!(img.file_name, "lesion.jpg");
        assert!(matches!(state, Analysis::Analyzing { .. }));

        assert!(state.complete(mel_predictions()));
        assert!(matches!(state, Analysis::ResultsReady { .. }));
        assert_eq!(state.predictions().unwrap()[&DiseaseCode::Mel], 87.5);
    }

    #[test]
    fn reentry_while_analyzing_is_a_no_op() {
        let mut state = Analysis::default();
        state.select_image(image("lesion.jpg"));
        state.begin().unwrap();
        let err = state.begin().unwrap_err();
        assert_eq!(err, TransitionError::AnalysisInProgress);
        assert!(matches!(state, Analysis::Analyzing { .. }));
    }

    #[test]
    fn failure_stores_message_and_clears_predictions() {
        let mut state = Analysis::default();
        state.select_image(image("lesion.jpg"));
        state.begin().unwrap();
        assert!(state.fail("service unreachable".into()));
        assert!(state.predictions().is_none());
        let snapshot = AnalysisSnapshot::of(&state);
        assert_eq!(snapshot.phase, Phase::Failed);
        assert_eq!(snapshot.error.as_deref(), Some("service unreachable"));
        assert!(snapshot.result.is_none());
    }

    #[test]
    fn new_selection_clears_prior_results_and_errors() {
        let mut state = Analysis::default();
        state.select_image(image("a.jpg"));
        state.begin().unwrap();
        state.complete(mel_predictions());

        state.select_image(image("b.jpg"));
        let snapshot = AnalysisSnapshot::of(&state);
        assert_eq!(snapshot.phase, Phase::ImageSelected);
        assert!(snapshot.result.is_none());
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.file_name.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn reanalysis_allowed_from_results_and_failed() {
        let mut state = Analysis::default();
        state.select_image(image("a.jpg"));
        state.begin().unwrap();
        state.complete(mel_predictions());
        assert!(state.begin().is_ok());

        state.fail("boom".into());
        assert!(state.begin().is_ok());
    }

    #[test]
    fn stale_resolution_is_dropped_after_reselection() {
        let mut state = Analysis::default();
        state.select_image(image("a.jpg"));
        state.begin().unwrap();

        // User picks a new file while the request is in flight.
        state.select_image(image("b.jpg"));
        assert!(!state.complete(mel_predictions()));
        assert!(!state.fail("late error".into()));

        let snapshot = AnalysisSnapshot::of(&state);
        assert_eq!(snapshot.phase, Phase::ImageSelected);
        assert_eq!(snapshot.file_name.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn empty_results_show_no_result_and_no_error() {
        let mut state = Analysis::default();
        state.select_image(image("a.jpg"));
        state.begin().unwrap();
        state.complete(PredictionResult::new());

        let snapshot = AnalysisSnapshot::of(&state);
        assert_eq!(snapshot.phase, Phase::ResultsReady);
        assert!(snapshot.result.is_none());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn snapshot_result_carries_derived_view() {
        let mut state = Analysis::default();
        state.select_image(image("a.jpg"));
        state.begin().unwrap();
        state.complete(mel_predictions());

        let snapshot = AnalysisSnapshot::of(&state);
        let result = snapshot.result.unwrap();
        assert_eq!(result.top.code, DiseaseCode::Mel);
        assert_eq!(result.info.full_name, "Melanoma");
        assert_eq!(result.series.values.len(), 7);
    }

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&Phase::ResultsReady).unwrap();
        assert_eq!(json, "\"results_ready\"");
        let json = serde_json::to_string(&Phase::ImageSelected).unwrap();
        assert_eq!(json, "\"image_selected\"");
    }
}
