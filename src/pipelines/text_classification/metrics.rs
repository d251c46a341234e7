//! Evaluation metrics over integer class codes

use std::fmt::Display;

use serde::Serialize;

/// Fraction of predictions that match the ground truth
pub fn accuracy_score(truth: &[usize], predicted: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }

    let correct = truth
        .iter()
        .zip(predicted.iter())
        .filter(|(t, p)| t == p)
        .count();

    correct as f64 / truth.len() as f64
}

/// F1 score of a single class treated as the positive class
pub fn f1_score(truth: &[usize], predicted: &[usize], positive: usize) -> f64 {
    ClassMetrics::compute(truth, predicted, positive, String::new()).f1_score
}

/// Precision, recall and F1 score for one class
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    /// The class label
    pub label: String,

    /// TP / (TP + FP)
    pub precision: f64,

    /// TP / (TP + FN)
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f1_score: f64,

    /// Number of ground truth samples of this class
    pub support: usize,
}

impl ClassMetrics {
    fn compute(truth: &[usize], predicted: &[usize], class: usize, label: String) -> Self {
        let mut tp = 0;
        let mut fp = 0;
        let mut fn_ = 0;

        for (t, p) in truth.iter().zip(predicted.iter()) {
            match (*t == class, *p == class) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);

        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            label,
            precision,
            recall,
            f1_score,
            support: tp + fn_,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Averaged precision, recall and F1 score
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Average {
    /// Averaged precision
    pub precision: f64,

    /// Averaged recall
    pub recall: f64,

    /// Averaged F1 score
    pub f1_score: f64,
}

/// Per-class metrics with accuracy and macro/weighted averages
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// Metrics for each class, ordered by class code
    pub classes: Vec<ClassMetrics>,

    /// Overall accuracy
    pub accuracy: f64,

    /// Unweighted mean over classes
    pub macro_avg: Average,

    /// Mean over classes weighted by support
    pub weighted_avg: Average,

    /// Total number of samples
    pub support: usize,
}

impl ClassificationReport {
    /// Build a report for class codes `0..labels.len()`
    pub fn new(truth: &[usize], predicted: &[usize], labels: &[String]) -> Self {
        let classes: Vec<ClassMetrics> = labels
            .iter()
            .enumerate()
            .map(|(class, label)| ClassMetrics::compute(truth, predicted, class, label.clone()))
            .collect();

        let n_classes = classes.len().max(1) as f64;
        let support = truth.len();

        let macro_avg = Average {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n_classes,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n_classes,
            f1_score: classes.iter().map(|c| c.f1_score).sum::<f64>() / n_classes,
        };

        let weighted = |metric: fn(&ClassMetrics) -> f64| {
            if support == 0 {
                return 0.0;
            }

            classes
                .iter()
                .map(|c| metric(c) * c.support as f64)
                .sum::<f64>()
                / support as f64
        };

        let weighted_avg = Average {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1_score: weighted(|c| c.f1_score),
        };

        Self {
            accuracy: accuracy_score(truth, predicted),
            classes,
            macro_avg,
            weighted_avg,
            support,
        }
    }
}

impl Display for ClassificationReport {
    /// Lay the report out as a table in the style of scikit-learn
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or_default();

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for c in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1_score, c.support
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.support
        )?;

        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1_score, self.support
            )?;
        }

        Ok(())
    }
}
