//! Shared application state and the analyze orchestration.
//!
//! `CoreState` owns the single interaction state slot. The no-overlap
//! guarantee lives here: the in-flight flag is reserved before the machine
//! moves to `Analyzing`, the network call runs outside every lock, and the
//! flag is released only after the resolution is applied. Re-triggering
//! analyze while a request is pending is a no-op that performs no call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::analysis::ChartSeries;
use crate::predictor::ClassifierClient;
use crate::session::{Analysis, AnalysisSnapshot, SelectedImage, TransitionError};

/// Global application state managed by Tauri.
pub struct CoreState {
    analysis: Mutex<Analysis>,
    /// True while a prediction request is on the wire. Separate from the
    /// phase so a file re-selection during a pending request cannot open a
    /// second request slot.
    request_in_flight: AtomicBool,
}

impl CoreState {
    pub fn new() -> Self {
        Self {
            analysis: Mutex::new(Analysis::Idle),
            request_in_flight: AtomicBool::new(false),
        }
    }

    fn lock_analysis(&self) -> Result<std::sync::MutexGuard<'_, Analysis>, CoreError> {
        self.analysis.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Current state projection for the frontend.
    pub fn snapshot(&self) -> Result<AnalysisSnapshot, CoreError> {
        Ok(AnalysisSnapshot::of(&*self.lock_analysis()?))
    }

    /// Register a newly selected image. Valid from every phase; clears prior
    /// results and errors.
    pub fn select_image(&self, image: SelectedImage) -> Result<AnalysisSnapshot, CoreError> {
        let mut analysis = self.lock_analysis()?;
        analysis.select_image(image);
        tracing::info!(file = ?analysis.image().map(|i| &i.file_name), "Image selected");
        Ok(AnalysisSnapshot::of(&analysis))
    }

    /// Chart series over the current predictions, `None` when there is no
    /// result to chart.
    pub fn chart_series(&self) -> Result<Option<ChartSeries>, CoreError> {
        let analysis = self.lock_analysis()?;
        Ok(analysis
            .predictions()
            .filter(|p| !p.is_empty())
            .map(crate::analysis::build_series))
    }

    /// Derived view plus raw image bytes for report composition, `None`
    /// when there is no derivable result yet.
    pub fn report_inputs(
        &self,
    ) -> Result<Option<(crate::analysis::DerivedView, Option<Vec<u8>>)>, CoreError> {
        let analysis = self.lock_analysis()?;
        let Some(view) = analysis
            .predictions()
            .and_then(crate::analysis::DerivedView::from_predictions)
        else {
            return Ok(None);
        };
        let image_bytes = analysis.image().map(|i| i.bytes.clone());
        Ok(Some((view, image_bytes)))
    }

    /// Full analyze cycle: transition to `Analyzing`, upload, apply the
    /// resolution. Exactly one network call happens per accepted trigger;
    /// a trigger while a request is pending returns the current snapshot
    /// untouched.
    pub fn run_analysis(
        &self,
        client: &dyn ClassifierClient,
    ) -> Result<AnalysisSnapshot, CoreError> {
        if self
            .request_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Analyze trigger ignored, request already pending");
            return self.snapshot();
        }

        let begun = match self.lock_analysis() {
            Ok(mut analysis) => analysis.begin(),
            Err(e) => {
                self.request_in_flight.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        let image = match begun {
            Ok(image) => image,
            Err(e @ TransitionError::NoImageSelected) => {
                self.request_in_flight.store(false, Ordering::SeqCst);
                return Err(CoreError::Transition(e));
            }
            Err(TransitionError::AnalysisInProgress) => {
                // Phase can only be Analyzing while the flag is held, so this
                // arm is unreachable in practice; treat it as the same no-op.
                self.request_in_flight.store(false, Ordering::SeqCst);
                return self.snapshot();
            }
        };

        tracing::info!(file = %image.file_name, bytes = image.bytes.len(), "Uploading image for analysis");
        let outcome = client.classify(&image.file_name, &image.bytes);

        let result = match self.lock_analysis() {
            Ok(mut analysis) => {
                match outcome {
                    Ok(predictions) => {
                        tracing::info!(classes = predictions.len(), "Prediction received");
                        analysis.complete(predictions);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Prediction request failed");
                        analysis.fail(e.to_string());
                    }
                }
                Ok(AnalysisSnapshot::of(&analysis))
            }
            Err(e) => Err(e),
        };

        self.request_in_flight.store(false, Ordering::SeqCst);
        result
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Barrier};

    use crate::analysis::PredictionResult;
    use crate::knowledge::DiseaseCode;
    use crate::predictor::{MockClassifier, PredictError, ServiceHealth};
    use crate::session::Phase;

    fn select(state: &CoreState, name: &str) {
        state
            .select_image(SelectedImage {
                path: PathBuf::from(format!("/photos/{name}")),
                file_name: name.to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            })
            .unwrap();
    }

    fn mel_predictions() -> PredictionResult {
        let mut p = PredictionResult::new();
        p.insert(DiseaseCode::Mel, 87.5);
        p.insert(DiseaseCode::Nv, 5.0);
        p
    }

    #[test]
    fn analyze_without_selection_surfaces_validation_message() {
        let state = CoreState::new();
        let mock = MockClassifier::returning(mel_predictions());
        let err = state.run_analysis(&mock).unwrap_err();
        assert_eq!(err.to_string(), "Please upload an image first.");
        assert_eq!(mock.call_count(), 0);
        assert_eq!(state.snapshot().unwrap().phase, Phase::Idle);
    }

    #[test]
    fn successful_analysis_reaches_results() {
        let state = CoreState::new();
        let mock = MockClassifier::returning(mel_predictions());
        select(&state, "lesion.jpg");

        let snapshot = state.run_analysis(&mock).unwrap();
        assert_eq!(snapshot.phase, Phase::ResultsReady);
        assert_eq!(mock.call_count(), 1);
        let result = snapshot.result.unwrap();
        assert_eq!(result.top.code, DiseaseCode::Mel);
        assert_eq!(result.top.probability, 87.5);
    }

    #[test]
    fn failed_analysis_surfaces_service_message() {
        let state = CoreState::new();
        let mock = MockClassifier::failing("Uploaded image does not appear to be a skin-related image");
        select(&state, "cat.jpg");

        let snapshot = state.run_analysis(&mock).unwrap();
        assert_eq!(snapshot.phase, Phase::Failed);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Uploaded image does not appear to be a skin-related image")
        );
        assert!(snapshot.result.is_none());
        assert!(state.chart_series().unwrap().is_none());
    }

    #[test]
    fn chart_series_present_only_with_results() {
        let state = CoreState::new();
        assert!(state.chart_series().unwrap().is_none());

        let mock = MockClassifier::returning(mel_predictions());
        select(&state, "lesion.jpg");
        state.run_analysis(&mock).unwrap();

        let series = state.chart_series().unwrap().unwrap();
        assert_eq!(series.values.len(), 7);
        assert_eq!(series.values[6], 87.5); // mel is last in fixed order
    }

    #[test]
    fn empty_prediction_map_yields_no_chart_and_no_error() {
        let state = CoreState::new();
        let mock = MockClassifier::returning(PredictionResult::new());
        select(&state, "lesion.jpg");

        let snapshot = state.run_analysis(&mock).unwrap();
        assert_eq!(snapshot.phase, Phase::ResultsReady);
        assert!(snapshot.error.is_none());
        assert!(state.chart_series().unwrap().is_none());
    }

    /// Classifier that parks inside `classify` until released, so tests can
    /// observe the pending state deterministically.
    struct BlockingClassifier {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
        calls: AtomicUsize,
    }

    impl ClassifierClient for BlockingClassifier {
        fn classify(
            &self,
            _file_name: &str,
            _bytes: &[u8],
        ) -> Result<PredictionResult, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.wait();
            self.release.wait();
            let mut p = PredictionResult::new();
            p.insert(DiseaseCode::Bkl, 60.0);
            Ok(p)
        }

        fn health_check(&self) -> Result<ServiceHealth, PredictError> {
            Ok(ServiceHealth {
                reachable: true,
                base_url: "mock://blocking".to_string(),
            })
        }
    }

    #[test]
    fn double_trigger_performs_exactly_one_network_call() {
        let state = Arc::new(CoreState::new());
        select(&state, "lesion.jpg");

        let classifier = Arc::new(BlockingClassifier {
            entered: Arc::new(Barrier::new(2)),
            release: Arc::new(Barrier::new(2)),
            calls: AtomicUsize::new(0),
        });

        let worker_state = Arc::clone(&state);
        let worker_classifier = Arc::clone(&classifier);
        let worker = std::thread::spawn(move || {
            worker_state.run_analysis(&*worker_classifier).unwrap()
        });

        // Wait until the first request is on the wire.
        classifier.entered.wait();

        // Second trigger while pending: no-op, no extra call, still analyzing.
        let snapshot = state.run_analysis(&*classifier).unwrap();
        assert_eq!(snapshot.phase, Phase::Analyzing);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);

        classifier.release.wait();
        let final_snapshot = worker.join().unwrap();
        assert_eq!(final_snapshot.phase, Phase::ResultsReady);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reselection_during_pending_request_drops_stale_result() {
        let state = Arc::new(CoreState::new());
        select(&state, "a.jpg");

        let classifier = Arc::new(BlockingClassifier {
            entered: Arc::new(Barrier::new(2)),
            release: Arc::new(Barrier::new(2)),
            calls: AtomicUsize::new(0),
        });

        let worker_state = Arc::clone(&state);
        let worker_classifier = Arc::clone(&classifier);
        let worker = std::thread::spawn(move || {
            worker_state.run_analysis(&*worker_classifier).unwrap()
        });

        classifier.entered.wait();
        select(&state, "b.jpg");
        classifier.release.wait();
        worker.join().unwrap();

        // The resolution for a.jpg arrived after b.jpg was selected: stale.
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::ImageSelected);
        assert_eq!(snapshot.file_name.as_deref(), Some("b.jpg"));
        assert!(snapshot.result.is_none());
    }
}
