//! Binary passive-aggressive classifier (PA-I, hinge loss).
//!
//! Each epoch visits the samples in a seeded shuffled order and only updates the weights when a
//! sample violates the unit margin. The step size is `min(C, loss / ||x||²)`.

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{artifact::Artifact, sparse::SparseVector, ModelError};

/// The positive class code. Scores above zero predict this class.
pub const POSITIVE_CLASS: usize = 1;

/// The negative class code
pub const NEGATIVE_CLASS: usize = 0;

/// Classifier hyper-parameters
#[derive(burn::config::Config, Debug)]
pub struct PassiveAggressiveConfig {
    /// Maximum step size (aggressiveness)
    #[config(default = 1.0)]
    pub c: f64,

    /// Maximum number of passes over the training data
    #[config(default = 1000)]
    pub max_iter: usize,

    /// Minimum improvement of the epoch loss, per sample, that resets the stopping counter
    #[config(default = 1e-3)]
    pub tol: f64,

    /// Number of epochs without improvement before stopping
    #[config(default = 5)]
    pub n_iter_no_change: usize,

    /// Shuffle the samples before every epoch
    #[config(default = true)]
    pub shuffle: bool,

    /// Scale applied to intercept updates, damping them for sparse inputs
    #[config(default = 0.01)]
    pub intercept_decay: f64,

    /// Seed for the epoch shuffles
    #[config(default = 42)]
    pub seed: u64,
}

/// A fitted linear decision boundary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassiveAggressive {
    /// The configuration used during fitting
    config: PassiveAggressiveConfig,

    /// One weight per feature
    weights: Vec<f64>,

    /// Bias term
    intercept: f64,

    /// Number of epochs actually run
    n_iter: usize,
}

impl PassiveAggressive {
    /// Fit the classifier on vectors with `n_features` dimensions and binary class codes
    pub fn fit(
        config: PassiveAggressiveConfig,
        n_features: usize,
        vectors: &[SparseVector],
        targets: &[usize],
    ) -> Result<Self, ModelError> {
        if vectors.len() != targets.len() {
            return Err(ModelError::LengthMismatch {
                vectors: vectors.len(),
                targets: targets.len(),
            });
        }

        if vectors.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        if let Some(unknown) = targets
            .iter()
            .find(|target| **target != NEGATIVE_CLASS && **target != POSITIVE_CLASS)
        {
            return Err(ModelError::UnknownClass(*unknown));
        }

        let positives = targets.iter().filter(|t| **t == POSITIVE_CLASS).count();

        if positives == 0 || positives == targets.len() {
            return Err(ModelError::NotBinary(1));
        }

        // Hinge loss works on signed targets
        let signs: Vec<f64> = targets
            .iter()
            .map(|target| if *target == POSITIVE_CLASS { 1.0 } else { -1.0 })
            .collect();

        let mut model = Self {
            weights: vec![0.0; n_features],
            intercept: 0.0,
            n_iter: 0,
            config,
        };

        let n_samples = vectors.len() as f64;
        let mut order: Vec<usize> = (0..vectors.len()).collect();
        let mut rng = StdRng::seed_from_u64(model.config.seed);

        let mut best_loss = f64::INFINITY;
        let mut no_improvement = 0;

        for epoch in 0..model.config.max_iter {
            if model.config.shuffle {
                order.shuffle(&mut rng);
            }

            let mut epoch_loss = 0.0;

            for &i in &order {
                let sample = &vectors[i];
                let sign = signs[i];

                let loss = (1.0 - sign * model.decision_function(sample)).max(0.0);
                epoch_loss += loss;

                if loss <= 0.0 {
                    continue;
                }

                let squared_norm = sample.squared_norm();

                if squared_norm == 0.0 {
                    continue;
                }

                let step = (loss / squared_norm).min(model.config.c) * sign;

                for (index, value) in sample.iter() {
                    if let Some(weight) = model.weights.get_mut(index) {
                        *weight += step * value;
                    }
                }

                model.intercept += step * model.config.intercept_decay;
            }

            model.n_iter = epoch + 1;

            debug!("Epoch {}: hinge loss {:.4}", model.n_iter, epoch_loss);

            if epoch_loss > best_loss - model.config.tol * n_samples {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }

            if epoch_loss < best_loss {
                best_loss = epoch_loss;
            }

            if no_improvement >= model.config.n_iter_no_change {
                break;
            }
        }

        info!(
            "Passive-aggressive training stopped after {} epochs (best hinge loss {:.4})",
            model.n_iter, best_loss
        );

        Ok(model)
    }

    /// Signed distance from the decision boundary. Not a calibrated probability.
    pub fn decision_function(&self, vector: &SparseVector) -> f64 {
        vector.dot(&self.weights) + self.intercept
    }

    /// Predict the class code for a vector
    pub fn predict(&self, vector: &SparseVector) -> usize {
        class_for_score(self.decision_function(vector))
    }

    /// Number of epochs run during fitting
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Number of features the classifier was fitted on
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

impl Artifact for PassiveAggressive {
    const FILE_NAME: &'static str = "model.json";
}

/// The class code selected by the sign of a decision score
pub fn class_for_score(score: f64) -> usize {
    if score > 0.0 {
        POSITIVE_CLASS
    } else {
        NEGATIVE_CLASS
    }
}

/// Squash a decision score into a confidence value with `1 / (1 + exp(-|score|))`.
///
/// This is a heuristic and not a calibrated posterior. It lies in `[0.5, 1)`, with very large
/// scores clamped just below 1.
pub fn confidence(score: f64) -> f64 {
    let value = 1.0 / (1.0 + (-score.abs()).exp());

    value.min(1.0 - f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Two clusters that differ in which feature dominates
    fn separable() -> (Vec<SparseVector>, Vec<usize>) {
        let vectors = vec![
            SparseVector::new(vec![0], vec![1.0]),
            SparseVector::new(vec![0, 2], vec![0.8, 0.6]),
            SparseVector::new(vec![1], vec![1.0]),
            SparseVector::new(vec![1, 2], vec![0.8, 0.6]),
        ];

        (vectors, vec![0, 0, 1, 1])
    }

    #[test]
    fn test_fits_separable_data() {
        let (vectors, targets) = separable();
        let model =
            PassiveAggressive::fit(PassiveAggressiveConfig::new(), 3, &vectors, &targets).unwrap();

        let predictions: Vec<usize> = vectors.iter().map(|v| model.predict(v)).collect();

        assert_eq!(predictions, targets);
        assert!(model.n_iter() < 1000);
        assert_eq!(model.n_features(), 3);
    }

    #[test]
    fn test_max_iter_bounds_training() {
        let (vectors, targets) = separable();
        let config = PassiveAggressiveConfig::new().with_max_iter(2);
        let model = PassiveAggressive::fit(config, 3, &vectors, &targets).unwrap();

        assert!(model.n_iter() <= 2);
    }

    #[test]
    fn test_fit_validates_targets() {
        let (vectors, _) = separable();

        assert!(matches!(
            PassiveAggressive::fit(PassiveAggressiveConfig::new(), 3, &vectors, &[0, 1]),
            Err(ModelError::LengthMismatch { .. })
        ));
        assert!(matches!(
            PassiveAggressive::fit(PassiveAggressiveConfig::new(), 3, &vectors, &[0, 0, 0, 0]),
            Err(ModelError::NotBinary(1))
        ));
        assert!(matches!(
            PassiveAggressive::fit(PassiveAggressiveConfig::new(), 3, &vectors, &[0, 1, 2, 1]),
            Err(ModelError::UnknownClass(2))
        ));
    }

    #[test]
    fn test_zero_vector_scores_the_intercept() {
        let (vectors, targets) = separable();
        let model =
            PassiveAggressive::fit(PassiveAggressiveConfig::new(), 3, &vectors, &targets).unwrap();

        let empty = SparseVector::default();

        assert_eq!(model.decision_function(&empty), model.intercept);
    }

    #[test]
    fn test_confidence_bounds() {
        assert_eq!(confidence(0.0), 0.5);

        for score in [-1e6, -40.0, -2.5, -1e-9, 1e-9, 0.7, 3.0, 40.0, 1e6] {
            let value = confidence(score);

            assert!((0.5..1.0).contains(&value), "confidence({score}) = {value}");
        }

        assert_eq!(confidence(-3.0), confidence(3.0));
    }

    #[test]
    fn test_class_for_score() {
        assert_eq!(class_for_score(0.3), POSITIVE_CLASS);
        assert_eq!(class_for_score(0.0), NEGATIVE_CLASS);
        assert_eq!(class_for_score(-0.3), NEGATIVE_CLASS);
    }
}
