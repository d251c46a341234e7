use std::{fmt::Display, fs, path::Path};

use anyhow::{bail, Context};
use burn::{config::Config as _, data::dataset::Dataset};
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::models::{
    passive_aggressive::POSITIVE_CLASS, LabelEncoder, ModelError, PassiveAggressive,
    TfIdfVectorizer,
};

use super::{
    config::{Config, CONFIG_FILE},
    inference::ModelBundle,
    metrics::{accuracy_score, f1_score, ClassificationReport},
    normalizer::clean_text,
    Item,
};

/// Held-out evaluation of a trained model
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// Number of training documents
    pub train_size: usize,

    /// Number of held-out documents
    pub test_size: usize,

    /// Held-out accuracy
    pub accuracy: f64,

    /// Held-out F1 score of the positive class
    pub f1: f64,

    /// Per-class breakdown
    pub report: ClassificationReport,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "F1 Score: {:.4}", self.f1)?;
        writeln!(f)?;
        writeln!(f, "Classification Report:")?;
        write!(f, "{}", self.report)
    }
}

/// The result of a training run
#[derive(Debug)]
pub struct Output {
    /// The fitted artifacts
    pub bundle: ModelBundle,

    /// Metrics on the held-out split
    pub evaluation: Evaluation,
}

/// Split sample indices into train and test sets, holding out `test_size` of every class.
///
/// Each class with at least two samples keeps at least one sample on both sides.
pub fn stratified_split(targets: &[usize], test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let n_classes = targets.iter().max().map_or(0, |max| max + 1);

    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in 0..n_classes {
        let mut members: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, target)| **target == class)
            .map(|(index, _)| index)
            .collect();

        members.shuffle(&mut rng);

        let count = members.len();
        let n_test = if count < 2 {
            0
        } else {
            ((count as f64 * test_size).round() as usize).clamp(1, count - 1)
        };

        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    (train, test)
}

/// Fit the vectorizer and classifier on a labeled dataset and evaluate them on a held-out split
pub fn train<I: Item, D: Dataset<I>>(dataset: D, config: &Config) -> anyhow::Result<Output> {
    if !(config.test_size > 0.0 && config.test_size < 1.0) {
        bail!("test size must be between 0 and 1, got {}", config.test_size);
    }

    let items: Vec<I> = dataset.iter().collect();

    if items.is_empty() {
        bail!("the training dataset is empty");
    }

    info!("Cleaning {} documents", items.len());

    let documents: Vec<String> = items.iter().map(|item| clean_text(item.input())).collect();

    let labels = LabelEncoder::fit(items.iter().map(|item| item.class_label()))?;

    if labels.len() != 2 {
        return Err(ModelError::NotBinary(labels.len()).into());
    }

    let targets = labels.encode_all(items.iter().map(|item| item.class_label()))?;

    let (train_indices, test_indices) =
        stratified_split(&targets, config.test_size, config.seed);

    info!(
        "Split into {} training and {} test documents",
        train_indices.len(),
        test_indices.len()
    );

    let pick_documents = |indices: &[usize]| -> Vec<&str> {
        indices.iter().map(|i| documents[*i].as_str()).collect()
    };
    let pick_targets =
        |indices: &[usize]| -> Vec<usize> { indices.iter().map(|i| targets[*i]).collect() };

    let train_documents = pick_documents(&train_indices);
    let train_targets = pick_targets(&train_indices);

    let vectorizer = TfIdfVectorizer::fit(config.vectorizer.clone(), &train_documents)?;
    let train_vectors = vectorizer.transform_all(&train_documents);

    let classifier = PassiveAggressive::fit(
        config.classifier.clone(),
        vectorizer.vocabulary_size(),
        &train_vectors,
        &train_targets,
    )?;

    let test_targets = pick_targets(&test_indices);
    let predicted: Vec<usize> = vectorizer
        .transform_all(&pick_documents(&test_indices))
        .iter()
        .map(|vector| classifier.predict(vector))
        .collect();

    let evaluation = Evaluation {
        train_size: train_indices.len(),
        test_size: test_indices.len(),
        accuracy: accuracy_score(&test_targets, &predicted),
        f1: f1_score(&test_targets, &predicted, POSITIVE_CLASS),
        report: ClassificationReport::new(&test_targets, &predicted, labels.classes()),
    };

    info!(
        "Held-out accuracy {:.4}, F1 {:.4}",
        evaluation.accuracy, evaluation.f1
    );

    let bundle = ModelBundle::new(vectorizer, classifier, labels)?;

    Ok(Output { bundle, evaluation })
}

/// Save the fitted artifacts and the run configuration into the artifact directory
pub fn save(bundle: &ModelBundle, config: &Config, artifact_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(artifact_dir)
        .with_context(|| format!("unable to create {}", artifact_dir.display()))?;

    bundle.save(artifact_dir)?;

    config
        .save(artifact_dir.join(CONFIG_FILE))
        .with_context(|| format!("unable to save the configuration to {}", artifact_dir.display()))?;

    info!("Saved artifacts to {}", artifact_dir.display());

    Ok(())
}
