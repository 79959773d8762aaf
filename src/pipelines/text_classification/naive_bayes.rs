use serde::{Deserialize, Serialize};

use super::{label::Label, pipeline::FitError, vectorizer::SparseVector};

/// Multinomial Naive Bayes over non-negative feature vectors, with additive smoothing and class
/// priors estimated from the training labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MultinomialNb {
    /// Additive (Laplace/Lidstone) smoothing parameter
    alpha: f64,

    /// Training documents seen per class, indexed by `Label::index`
    class_count: Vec<usize>,

    /// `ln(P(class))`, indexed by `Label::index`
    class_log_prior: Vec<f64>,

    /// `ln(P(feature | class))`, one row per class
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Estimate the class priors and per-class feature distributions
    pub fn fit(
        features: &[SparseVector],
        labels: &[Label],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self, FitError> {
        if features.is_empty() {
            return Err(FitError::NoDocuments);
        }

        debug_assert_eq!(features.len(), labels.len());

        if alpha.is_nan() || alpha <= 0.0 {
            return Err(FitError::InvalidAlpha(alpha));
        }

        let n_classes = Label::ALL.len();
        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0f64; n_features]; n_classes];

        for (vector, label) in features.iter().zip(labels) {
            let class = label.index();
            class_count[class] += 1;

            for &(index, value) in vector {
                feature_count[class][index] += value;
            }
        }

        if let Some(missing) = Label::ALL.iter().find(|l| class_count[l.index()] == 0) {
            return Err(FitError::MissingClass(*missing));
        }

        let n_documents = features.len() as f64;

        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / n_documents).ln())
            .collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let total = counts.iter().sum::<f64>() + alpha * n_features as f64;

                counts
                    .into_iter()
                    .map(|count| ((count + alpha) / total).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            alpha,
            class_count,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Check that there is one prior and one `n_features`-wide row per class
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        let n_classes = Label::ALL.len();

        if self.class_count.len() != n_classes
            || self.class_log_prior.len() != n_classes
            || self.feature_log_prob.len() != n_classes
        {
            return Err(format!(
                "expected {} classes, found {} counts, {} priors and {} feature rows",
                n_classes,
                self.class_count.len(),
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            ));
        }

        if let Some(row) = self
            .feature_log_prob
            .iter()
            .find(|row| row.len() != n_features)
        {
            return Err(format!(
                "feature row has {} columns but the vocabulary has {}",
                row.len(),
                n_features
            ));
        }

        Ok(())
    }

    /// The joint log likelihood of each class, indexed by `Label::index`
    pub fn joint_log_likelihood(&self, vector: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + vector
                        .iter()
                        .map(|&(index, value)| value * log_prob[index])
                        .sum::<f64>()
            })
            .collect()
    }

    /// The most likely class. Ties go to the class that comes first.
    pub fn predict(&self, vector: &SparseVector) -> Label {
        let scores = self.joint_log_likelihood(vector);

        let mut best = Label::ALL[0];
        for label in Label::ALL.iter().skip(1) {
            if scores[label.index()] > scores[best.index()] {
                best = *label;
            }
        }

        best
    }
}
