use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    pipelines::text_classification::{label::LabelError, Item},
    utils::download::DownloadError,
};

/// The SMS Spam Collection dataset
pub mod sms_spam;

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset<I: Item>: Sized {
    /// Load the dataset from the data directory, fetching it from `url` if it is not there yet
    async fn load(data_dir: &str, url: &str) -> Result<Self, DatasetError>;

    /// Every example in the dataset
    fn items(&self) -> &[I];

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether the dataset has no examples
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset could not be fetched
    #[error("unable to acquire dataset: {0}")]
    Download(#[from] DownloadError),

    /// The dataset file could not be read
    #[error("unable to read dataset {path}: {source}")]
    Io {
        /// The dataset path
        path: PathBuf,

        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid CSV
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// No recognized column layout
    #[error("unrecognized column layout: {0}")]
    Schema(String),

    /// A row carries a label other than spam or ham
    #[error("line {line}: {source}")]
    UnknownLabel {
        /// One-based line number of the row
        line: u64,

        /// The label problem
        #[source]
        source: LabelError,
    },

    /// Nothing to train on
    #[error("dataset contains no examples")]
    Empty,
}
