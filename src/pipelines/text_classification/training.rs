use std::path::{Path, PathBuf};

use derive_new::new;
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{datasets::LoadableDataset, utils::files::write_atomic};

use super::{
    metrics::Report,
    pipeline::{ArtifactError, FitError, Pipeline},
    stop_words::StopWords,
    Item, Label, PIPELINE,
};

/// The file name of the serialized pipeline inside the artifact directory
pub static MODEL_FILE: &str = "model.json";

/// The file name of the training configuration inside the artifact directory
pub static CONFIG_FILE: &str = "config.json";

/// Define configuration struct for the experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct Config {
    /// Model name (e.g., "tfidf-multinomial-nb")
    pub model_name: String,

    /// The Dataset to use (e.g., "sms-spam")
    pub dataset_name: String,

    /// The location of the top-level data directory
    #[new(value = "\"data\".to_string()")]
    pub data_dir: String,

    /// Fraction of the dataset held out for evaluation
    #[new(value = "0.2")]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[new(value = "42")]
    pub seed: u64,

    /// Naive Bayes smoothing
    #[new(value = "1.0")]
    pub alpha: f64,

    /// Words removed before vectorizing
    #[new(default)]
    pub stop_words: StopWords,
}

impl Config {
    /// The directory holding the artifact and this config
    pub fn artifact_dir(&self) -> PathBuf {
        artifact_dir(&self.data_dir, &self.model_name)
    }

    /// Save the configuration as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let bytes = serde_json::to_vec_pretty(self)?;

        write_atomic(path, &bytes).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load a configuration saved by `save`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// The directory where a model's artifacts live
pub fn artifact_dir(data_dir: impl AsRef<Path>, model_name: &str) -> PathBuf {
    data_dir.as_ref().join(PIPELINE).join(model_name)
}

/// The default location of a model's serialized pipeline
pub fn artifact_path(data_dir: impl AsRef<Path>, model_name: &str) -> PathBuf {
    artifact_dir(data_dir, model_name).join(MODEL_FILE)
}

/// Shuffle with a fixed seed and split off `ceil(len * test_size)` items for testing. Returns
/// `(train, test)`.
pub fn train_test_split<T>(
    mut items: Vec<T>,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>), TrainingError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TrainingError::InvalidTestSize(test_size));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    let n_test = ((items.len() as f64 * test_size).ceil() as usize).min(items.len());
    let train = items.split_off(n_test);

    Ok((train, items))
}

/// The result of a training run
#[derive(Debug)]
pub struct Trained {
    /// The fitted pipeline, identical to the saved artifact
    pub pipeline: Pipeline,

    /// Evaluation on the held-out partition
    pub report: Report,

    /// Where the artifact was written
    pub artifact: PathBuf,

    /// Number of training examples
    pub n_train: usize,

    /// Number of held-out examples
    pub n_test: usize,
}

/// Define train function. Nothing is written unless fitting succeeds, and the artifact is only
/// replaced once its config has been saved.
pub fn train<I, D>(dataset: &D, config: &Config) -> Result<Trained, TrainingError>
where
    I: Item,
    D: LoadableDataset<I>,
{
    let (train, test) = train_test_split(dataset.items().to_vec(), config.test_size, config.seed)?;

    info!(
        "Training on {} examples, holding out {}",
        train.len(),
        test.len()
    );

    let pipeline = Pipeline::fit(&train, &config.stop_words, config.alpha)?;

    info!("Evaluating...");

    let expected: Vec<Label> = test.iter().map(|item| item.class_label()).collect();
    let texts: Vec<&str> = test.iter().map(|item| item.input()).collect();
    let predicted = pipeline.predict_batch(&texts);

    let report = Report::evaluate(&expected, &predicted);

    let artifact_dir = config.artifact_dir();
    let artifact = artifact_dir.join(MODEL_FILE);

    // Config first, the artifact is replaced last
    config.save(artifact_dir.join(CONFIG_FILE))?;
    pipeline.save(&artifact)?;

    Ok(Trained {
        pipeline,
        report,
        artifact,
        n_train: train.len(),
        n_test: test.len(),
    })
}

/// Training Error
#[derive(thiserror::Error, Debug)]
pub enum TrainingError {
    /// The held-out fraction must be strictly between 0 and 1
    #[error("test size must be between 0 and 1, got {0}")]
    InvalidTestSize(f64),

    /// The pipeline could not be fitted
    #[error("unable to fit the pipeline: {0}")]
    Fit(#[from] FitError),

    /// The artifact could not be written
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_defaults() {
        let config = Config::new("tfidf-multinomial-nb".to_string(), "sms-spam".to_string());

        assert_eq!(config.data_dir, "data");
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.stop_words, StopWords::English);
        assert_eq!(
            config.artifact_dir(),
            PathBuf::from("data/text-classification/tfidf-multinomial-nb")
        );
    }

    #[test]
    fn split_is_reproducible() {
        let items: Vec<usize> = (0..11).collect();

        let (train_a, test_a) = train_test_split(items.clone(), 0.2, 42).unwrap();
        let (train_b, test_b) = train_test_split(items, 0.2, 42).unwrap();

        assert_eq!(test_a.len(), 3);
        assert_eq!(train_a.len(), 8);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        let mut all: Vec<usize> = train_a.into_iter().chain(test_a).collect();
        all.sort();
        assert_eq!(all, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn split_rejects_bad_fractions() {
        for test_size in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(matches!(
                train_test_split(vec![1, 2, 3], test_size, 42),
                Err(TrainingError::InvalidTestSize(_))
            ));
        }
    }

    #[test]
    fn failed_config_write_leaves_no_artifact() {
        use crate::datasets::sms_spam::{Dataset, Item as Sms};

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new("tfidf-multinomial-nb".to_string(), "sms-spam".to_string());
        config.data_dir = dir.path().to_str().unwrap().to_string();

        // A directory where the config file should go makes the rename fail
        std::fs::create_dir_all(config.artifact_dir().join(CONFIG_FILE)).unwrap();

        let items = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    Sms::new(Label::Spam, format!("claim your free cash prize {}", i))
                } else {
                    Sms::new(Label::Ham, format!("lunch at the office {}", i))
                }
            })
            .collect();

        let result = train::<Sms, _>(&Dataset::new(items), &config);

        assert!(matches!(
            result,
            Err(TrainingError::Artifact(ArtifactError::Io { .. }))
        ));
        assert!(!config.artifact_dir().join(MODEL_FILE).exists());
    }

    #[test]
    fn config_survives_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::new("m".to_string(), "d".to_string());
        config.stop_words = StopWords::Custom(vec!["foo".to_string()]);

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
