use std::fmt::Display;

use super::Label;

/// Precision, recall and F1 for one class (or an average over classes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    /// Fraction of predictions for the class that were right
    pub precision: f64,

    /// Fraction of the class that was found
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f1: f64,

    /// Number of true examples of the class
    pub support: usize,
}

/// Held-out evaluation of a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Fraction of correct predictions
    pub accuracy: f64,

    /// Scores for each class, in class order
    pub classes: Vec<(Label, Scores)>,

    /// Unweighted mean over classes
    pub macro_avg: Scores,

    /// Mean over classes weighted by support
    pub weighted_avg: Scores,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Report {
    /// Compare predictions against the expected labels. Undefined ratios (no predictions or no
    /// examples for a class) count as zero.
    pub fn evaluate(expected: &[Label], predicted: &[Label]) -> Self {
        let total = expected.len().min(predicted.len());
        let pairs = || expected.iter().zip(predicted.iter());

        let correct = pairs().filter(|(e, p)| e == p).count();

        let classes: Vec<(Label, Scores)> = Label::ALL
            .iter()
            .map(|&label| {
                let true_positive = pairs().filter(|(e, p)| **e == label && **p == label).count();
                let predicted_positive = pairs().filter(|(_, p)| **p == label).count();
                let support = pairs().filter(|(e, _)| **e == label).count();

                let precision = ratio(true_positive, predicted_positive);
                let recall = ratio(true_positive, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                (
                    label,
                    Scores {
                        precision,
                        recall,
                        f1,
                        support,
                    },
                )
            })
            .collect();

        let n_classes = classes.len() as f64;
        let mean = |f: fn(&Scores) -> f64| classes.iter().map(|(_, s)| f(s)).sum::<f64>() / n_classes;
        let weighted = |f: fn(&Scores) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|(_, s)| f(s) * s.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };

        let macro_avg = Scores {
            precision: mean(|s| s.precision),
            recall: mean(|s| s.recall),
            f1: mean(|s| s.f1),
            support: total,
        };

        let weighted_avg = Scores {
            precision: weighted(|s| s.precision),
            recall: weighted(|s| s.recall),
            f1: weighted(|s| s.f1),
            support: total,
        };

        Self {
            accuracy: ratio(correct, total),
            classes,
            macro_avg,
            weighted_avg,
        }
    }

    /// The number of evaluated examples
    pub fn support(&self) -> usize {
        self.macro_avg.support
    }
}

fn write_row(f: &mut std::fmt::Formatter<'_>, name: &str, s: &Scores) -> std::fmt::Result {
    writeln!(
        f,
        "{:>12}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
        name, s.precision, s.recall, s.f1, s.support
    )
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>12}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for (label, scores) in &self.classes {
            write_row(f, label.as_str(), scores)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:>12}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        write_row(f, "macro avg", &self.macro_avg)?;
        write_row(f, "weighted avg", &self.weighted_avg)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    use Label::{Ham, Spam};

    #[test]
    fn computes_per_class_scores() {
        let expected = [Ham, Ham, Ham, Spam, Spam];
        let predicted = [Ham, Ham, Spam, Spam, Ham];

        let report = Report::evaluate(&expected, &predicted);

        assert_eq!(report.accuracy, 0.6);

        let (label, ham) = report.classes[0];
        assert_eq!(label, Ham);
        assert!((ham.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((ham.recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(ham.support, 3);

        let (_, spam) = report.classes[1];
        assert_eq!(spam.precision, 0.5);
        assert_eq!(spam.recall, 0.5);
        assert_eq!(spam.support, 2);

        assert!((report.weighted_avg.f1 - (3.0 * 2.0 / 3.0 + 2.0 * 0.5) / 5.0).abs() < 1e-12);
    }

    #[test]
    fn missing_predictions_score_zero() {
        let report = Report::evaluate(&[Ham, Spam], &[Ham, Ham]);
        let (_, spam) = report.classes[1];

        assert_eq!(spam.precision, 0.0);
        assert_eq!(spam.f1, 0.0);
    }

    #[test]
    fn renders_a_table() {
        let report = Report::evaluate(&[Ham, Spam], &[Ham, Spam]);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "              precision    recall  f1-score   support"
        );
        assert_eq!(
            lines[2],
            "         ham       1.00      1.00      1.00         1"
        );
        assert_eq!(
            lines[5],
            "    accuracy                           1.00         2"
        );
        assert_eq!(
            lines[7],
            "weighted avg       1.00      1.00      1.00         2"
        );
    }
}
