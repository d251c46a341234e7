use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::models::{
    passive_aggressive::confidence, Artifact, ArtifactError, LabelEncoder, ModelError,
    PassiveAggressive, TfIdfVectorizer,
};

use super::normalizer::clean_text;

/// Number of cleaned characters echoed back in an analysis
pub const PREVIEW_CHARS: usize = 200;

/// The three fitted objects needed to classify text
#[derive(Clone, Debug)]
pub struct ModelBundle {
    vectorizer: TfIdfVectorizer,
    classifier: PassiveAggressive,
    labels: LabelEncoder,
}

/// The prediction for one cleaned document
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// The predicted class label
    pub label: String,

    /// The raw decision score
    pub score: f64,

    /// Heuristic confidence in `[0.5, 1)`
    pub confidence: f64,
}

/// The response to an analysis request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The predicted label
    pub label: String,

    /// Heuristic confidence in `[0.5, 1)`
    pub confidence: f64,

    /// The start of the cleaned input text
    pub cleaned_text: String,
}

impl ModelBundle {
    /// Combine fitted objects, checking that they belong together
    pub fn new(
        vectorizer: TfIdfVectorizer,
        classifier: PassiveAggressive,
        labels: LabelEncoder,
    ) -> Result<Self, ModelError> {
        vectorizer.validate()?;

        if classifier.n_features() != vectorizer.vocabulary_size() {
            return Err(ModelError::FeatureMismatch {
                classifier: classifier.n_features(),
                vocabulary: vectorizer.vocabulary_size(),
            });
        }

        if labels.len() != 2 {
            return Err(ModelError::NotBinary(labels.len()));
        }

        Ok(Self {
            vectorizer,
            classifier,
            labels,
        })
    }

    /// Load all three artifacts from a directory
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let vectorizer = TfIdfVectorizer::load(dir)?;
        let classifier = PassiveAggressive::load(dir)?;
        let labels = LabelEncoder::load(dir)?;

        let bundle =
            Self::new(vectorizer, classifier, labels).map_err(|source| ArtifactError::Inconsistent {
                dir: dir.to_path_buf(),
                source,
            })?;

        info!(
            "Loaded artifacts from {} ({} features, classes {:?})",
            dir.display(),
            bundle.vectorizer.vocabulary_size(),
            bundle.labels.classes()
        );

        Ok(bundle)
    }

    /// Write all three artifacts into an existing directory
    pub fn save(&self, dir: &Path) -> Result<(), ArtifactError> {
        self.vectorizer.save(dir)?;
        self.classifier.save(dir)?;
        self.labels.save(dir)?;

        Ok(())
    }

    /// Classify text that has already been cleaned
    pub fn predict(&self, cleaned: &str) -> Result<Prediction, ModelError> {
        let vector = self.vectorizer.transform(cleaned);

        debug!(
            "{} of {} features active",
            vector.nnz(),
            self.vectorizer.vocabulary_size()
        );

        let score = self.classifier.decision_function(&vector);

        if !score.is_finite() {
            return Err(ModelError::NonFiniteScore);
        }

        let class = self.classifier.predict(&vector);
        let label = self.labels.decode(class)?.to_string();

        Ok(Prediction {
            label,
            score,
            confidence: confidence(score),
        })
    }

    /// Clean raw text, classify it and describe the result
    pub fn analyze(&self, text: &str) -> Result<Analysis, ModelError> {
        let cleaned = clean_text(text);
        let prediction = self.predict(&cleaned)?;

        Ok(Analysis {
            label: prediction.label,
            confidence: prediction.confidence,
            cleaned_text: cleaned.chars().take(PREVIEW_CHARS).collect(),
        })
    }

    /// The fitted vectorizer
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// The fitted classifier
    pub fn classifier(&self) -> &PassiveAggressive {
        &self.classifier
    }

    /// The fitted label encoder
    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::models::{PassiveAggressiveConfig, TfIdfConfig};

    fn bundle() -> ModelBundle {
        let corpus = [
            "senate pass budget bill",
            "senator debate budget",
            "shock secret cure doctor hate",
            "alien shock celebrity secret",
        ];

        let labels = LabelEncoder::fit(["REAL", "FAKE"]).unwrap();
        let targets = labels
            .encode_all(["REAL", "REAL", "FAKE", "FAKE"])
            .unwrap();

        let vectorizer = TfIdfVectorizer::fit(TfIdfConfig::new(), &corpus).unwrap();
        let vectors = vectorizer.transform_all(&corpus);
        let classifier = PassiveAggressive::fit(
            PassiveAggressiveConfig::new(),
            vectorizer.vocabulary_size(),
            &vectors,
            &targets,
        )
        .unwrap();

        ModelBundle::new(vectorizer, classifier, labels).unwrap()
    }

    #[test]
    fn test_analyze() {
        let bundle = bundle();

        let analysis = bundle.analyze("SHOCK: the secret cure!!").unwrap();

        assert_eq!(analysis.label, "FAKE");
        assert_eq!(analysis.cleaned_text, "shock secret cure");
        assert!((0.5..1.0).contains(&analysis.confidence));
    }

    #[test]
    fn test_preview_is_truncated() {
        let bundle = bundle();
        let text = "budget ".repeat(100);

        let analysis = bundle.analyze(&text).unwrap();

        assert_eq!(analysis.cleaned_text.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_unknown_text_still_predicts() {
        let bundle = bundle();

        let prediction = bundle.predict("zebra").unwrap();

        assert_eq!(prediction.score, bundle.classifier().decision_function(&Default::default()));
        assert!(bundle.labels().classes().contains(&prediction.label));
    }

    #[test]
    fn test_save_and_load_predict_identically() {
        let dir = TempDir::new().unwrap();
        let bundle = bundle();

        bundle.save(dir.path()).unwrap();
        let loaded = ModelBundle::load(dir.path()).unwrap();

        for text in ["senate budget", "secret shock", "doctor debate", ""] {
            assert_eq!(bundle.predict(text).unwrap(), loaded.predict(text).unwrap());
        }
    }

    #[test]
    fn test_load_missing_artifacts() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            ModelBundle::load(dir.path()),
            Err(ArtifactError::Io { .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_artifacts() {
        let bundle = bundle();
        let other = TfIdfVectorizer::fit(TfIdfConfig::new(), &["one two"]).unwrap();

        assert!(matches!(
            ModelBundle::new(other, bundle.classifier().clone(), bundle.labels().clone()),
            Err(ModelError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_load_rejects_truncated_idf() {
        let dir = TempDir::new().unwrap();
        bundle().save(dir.path()).unwrap();

        let path = TfIdfVectorizer::path(dir.path());
        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        json["idf"] = serde_json::json!([]);
        std::fs::write(&path, json.to_string()).unwrap();

        assert!(matches!(
            ModelBundle::load(dir.path()),
            Err(ArtifactError::Inconsistent {
                source: ModelError::CorruptVocabulary { .. },
                ..
            })
        ));
    }
}
