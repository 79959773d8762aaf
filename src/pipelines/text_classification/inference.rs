use std::path::Path;

use log::{info, warn};

use super::{
    pipeline::{ArtifactError, Pipeline},
    Label, Model,
};

/// The process-wide prediction state. Built once at start-up, then only read.
///
/// A predictor without a model is still usable: every request reports that the model is
/// unavailable.
#[derive(Debug)]
pub struct Predictor<M = Pipeline> {
    model: Option<M>,
}

impl Predictor<Pipeline> {
    /// Load the artifact at `path`. A missing file yields an unavailable predictor; a file that
    /// exists but cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                "Model artifact {} not found, predictions are disabled",
                path.display()
            );

            return Ok(Self::unavailable());
        }

        info!("Loading model from {}...", path.display());

        let pipeline = Pipeline::load(path)?;

        info!("Model loaded ({} features)", pipeline.n_features());

        Ok(Self::new(pipeline))
    }
}

impl<M: Model> Predictor<M> {
    /// Serve predictions from the given model
    pub fn new(model: M) -> Self {
        Self { model: Some(model) }
    }

    /// A predictor that has no model to serve
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    /// Whether a model is loaded
    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Classify one message. Blank input is rejected before the model is consulted.
    pub fn classify(&self, text: &str) -> Result<Label, InferenceError> {
        if text.trim().is_empty() {
            return Err(InferenceError::EmptyInput);
        }

        let model = self
            .model
            .as_ref()
            .ok_or(InferenceError::ModelUnavailable)?;

        Ok(model.predict(text))
    }
}

/// Inference Error
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceError {
    /// Nothing but whitespace was submitted
    #[error("please enter a message to check")]
    EmptyInput,

    /// No trained model was found at start-up
    #[error("model file not found, please ensure the model is trained")]
    ModelUnavailable,
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    /// Calls spam on anything mentioning "prize" and counts invocations
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Model for Counting {
        fn predict(&self, text: &str) -> Label {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if text.to_lowercase().contains("prize") {
                Label::Spam
            } else {
                Label::Ham
            }
        }
    }

    #[test]
    fn blank_input_never_reaches_the_model() {
        let predictor = Predictor::new(Counting::default());

        for text in ["", " ", "\t\n", "\u{00a0}\u{2003}"] {
            assert_eq!(predictor.classify(text), Err(InferenceError::EmptyInput));
        }

        let calls = predictor.model.as_ref().unwrap().calls.load(Ordering::SeqCst);
        assert_eq!(calls, 0);
    }

    #[test]
    fn classifies_through_the_model() {
        let predictor = Predictor::new(Counting::default());

        assert_eq!(predictor.classify("win a PRIZE"), Ok(Label::Spam));
        assert_eq!(predictor.classify("see you soon"), Ok(Label::Ham));
    }

    #[test]
    fn unavailable_predictor_reports_for_every_input() {
        let predictor = Predictor::<Counting>::unavailable();

        assert!(!predictor.is_available());
        assert_eq!(
            predictor.classify("WIN A FREE PRIZE NOW"),
            Err(InferenceError::ModelUnavailable)
        );
        assert_eq!(predictor.classify("   "), Err(InferenceError::EmptyInput));
    }

    #[test]
    fn missing_artifact_disables_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load(dir.path().join("model.json")).unwrap();

        assert!(!predictor.is_available());
        assert_eq!(
            predictor.classify("free cash"),
            Err(InferenceError::ModelUnavailable)
        );
    }
}
