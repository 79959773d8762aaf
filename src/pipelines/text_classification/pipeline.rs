use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::utils::files::write_atomic;

use super::{
    label::Label, model::Model, naive_bayes::MultinomialNb, stop_words::StopWords,
    vectorizer::TfIdfVectorizer, Item,
};

/// A fitted TF-IDF vectorizer fused with the Multinomial Naive Bayes classifier trained on its
/// output. Both halves come from the same fit and are saved and loaded together; the only way to
/// use them is `predict`, which always runs the full transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    vectorizer: TfIdfVectorizer,
    classifier: MultinomialNb,
}

impl Pipeline {
    /// Fit the vectorizer on the item texts, then the classifier on the resulting vectors
    pub fn fit<I: Item>(items: &[I], stop_words: &StopWords, alpha: f64) -> Result<Self, FitError> {
        let documents: Vec<&str> = items.iter().map(|item| item.input()).collect();
        let labels: Vec<Label> = items.iter().map(|item| item.class_label()).collect();

        let vectorizer = TfIdfVectorizer::fit(&documents, stop_words)?;
        debug!("Vocabulary size: {}", vectorizer.n_features());

        let features: Vec<_> = documents
            .iter()
            .map(|document| vectorizer.transform(document))
            .collect();

        let classifier = MultinomialNb::fit(&features, &labels, vectorizer.n_features(), alpha)?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Classify a single message
    pub fn predict(&self, text: &str) -> Label {
        self.classifier.predict(&self.vectorizer.transform(text))
    }

    /// Classify many messages
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Label> {
        texts.iter().map(|text| self.predict(text.as_ref())).collect()
    }

    /// The number of terms in the fitted vocabulary
    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Write the pipeline to `path` as a single JSON document, replacing any previous artifact
    /// in one step
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let bytes = serde_json::to_vec(self)?;

        write_atomic(path, &bytes).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!("Model saved to {}", path.display());

        Ok(())
    }

    /// Read a pipeline previously written by `save`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let pipeline: Self = serde_json::from_slice(&bytes)?;
        pipeline.validate()?;

        Ok(pipeline)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        self.vectorizer
            .validate()
            .and_then(|_| self.classifier.validate(self.vectorizer.n_features()))
            .map_err(ArtifactError::Inconsistent)
    }
}

impl Model for Pipeline {
    fn predict(&self, text: &str) -> Label {
        Pipeline::predict(self, text)
    }
}

/// Fit Error
#[derive(thiserror::Error, Debug)]
pub enum FitError {
    /// Nothing to learn from
    #[error("no training documents")]
    NoDocuments,

    /// Every token was a stop word or too short
    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,

    /// A class has no training examples
    #[error("no training examples labeled {0}")]
    MissingClass(Label),

    /// The smoothing parameter must be positive
    #[error("smoothing parameter must be positive, got {0}")]
    InvalidAlpha(f64),
}

/// Artifact Error
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    /// The artifact could not be read or written
    #[error("unable to access model artifact {path}: {source}")]
    Io {
        /// The artifact path
        path: String,

        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not a valid serialized pipeline
    #[error("invalid model artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact parsed but its parts do not fit together
    #[error("inconsistent model artifact: {0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Debug)]
    struct Example(&'static str, Label);

    impl Item for Example {
        fn input(&self) -> &str {
            self.0
        }

        fn class_label(&self) -> Label {
            self.1
        }
    }

    fn corpus() -> Vec<Example> {
        vec![
            Example("WIN a FREE prize, claim your cash", Label::Spam),
            Example("Free entry to win a cash reward", Label::Spam),
            Example("URGENT claim your prize voucher", Label::Spam),
            Example("are we meeting for lunch today", Label::Ham),
            Example("I'll see you at the office tomorrow", Label::Ham),
            Example("running late, dinner at home tonight", Label::Ham),
        ]
    }

    #[test]
    fn predicts_with_the_fused_transform() {
        let pipeline = Pipeline::fit(&corpus(), &StopWords::English, 1.0).unwrap();

        assert_eq!(pipeline.predict("claim your FREE cash prize"), Label::Spam);
        assert_eq!(pipeline.predict("lunch at the office"), Label::Ham);
        assert_eq!(
            pipeline.predict_batch(&["free prize", "dinner tonight"]),
            vec![Label::Spam, Label::Ham]
        );
    }

    #[test]
    fn save_and_load_preserve_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let pipeline = Pipeline::fit(&corpus(), &StopWords::English, 1.0).unwrap();

        pipeline.save(&path).unwrap();
        let loaded = Pipeline::load(&path).unwrap();

        let probes = ["free cash", "office lunch", "", "zzz unknown"];
        assert_eq!(loaded.predict_batch(&probes), pipeline.predict_batch(&probes));
    }

    #[test]
    fn load_reports_garbage_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{not json").unwrap();

        assert!(matches!(Pipeline::load(&path), Err(ArtifactError::Json(_))));
        assert!(matches!(
            Pipeline::load(dir.path().join("missing.json")),
            Err(ArtifactError::Io { .. })
        ));
    }

    #[test]
    fn load_rejects_artifacts_with_mismatched_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let pipeline = Pipeline::fit(&corpus(), &StopWords::English, 1.0).unwrap();
        let valid = serde_json::to_value(&pipeline).unwrap();

        let tamper = |edit: &dyn Fn(&mut serde_json::Value)| {
            let mut artifact = valid.clone();
            edit(&mut artifact);
            std::fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

            Pipeline::load(&path)
        };

        let out_of_range = tamper(&|a| {
            a["vectorizer"]["vocabulary"]["win"] = serde_json::json!(9999);
        });
        assert!(matches!(out_of_range, Err(ArtifactError::Inconsistent(_))));

        let short_idf = tamper(&|a| {
            a["vectorizer"]["idf"].as_array_mut().unwrap().pop();
        });
        assert!(matches!(short_idf, Err(ArtifactError::Inconsistent(_))));

        let one_prior = tamper(&|a| {
            a["classifier"]["class_log_prior"].as_array_mut().unwrap().pop();
        });
        assert!(matches!(one_prior, Err(ArtifactError::Inconsistent(_))));

        let narrow_row = tamper(&|a| {
            a["classifier"]["feature_log_prob"][1]
                .as_array_mut()
                .unwrap()
                .pop();
        });
        assert!(matches!(narrow_row, Err(ArtifactError::Inconsistent(_))));

        let untouched = tamper(&|_| {});
        assert_eq!(untouched.unwrap(), pipeline);
    }
}
