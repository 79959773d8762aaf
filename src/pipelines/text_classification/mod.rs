/// The unique string token that identifies this pipeline
pub static PIPELINE: &str = "text-classification";

/// The default model to use for text classification
pub static DEFAULT_MODEL: &str = "tfidf-multinomial-nb";

/// Class labels
pub mod label;

/// Common model trait for text classification
pub mod model;

/// Text Classification Items
pub mod item;

/// Stop-word lists
pub mod stop_words;

/// TF-IDF feature extraction
mod vectorizer;

/// Multinomial Naive Bayes
mod naive_bayes;

/// The fused vectorizer + classifier
pub mod pipeline;

/// Evaluation metrics
pub mod metrics;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use inference::{InferenceError, Predictor};
pub use item::Item;
pub use label::Label;
pub use metrics::Report;
pub use model::Model;
pub use pipeline::{ArtifactError, FitError, Pipeline};
pub use stop_words::StopWords;
pub use training::{train, Config};
pub use vectorizer::tokenize;
