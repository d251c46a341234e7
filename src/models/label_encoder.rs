use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::classes::{first_seen, invert_map};

use super::{artifact::Artifact, ModelError};

/// A bidirectional mapping between class labels and integer codes.
///
/// Codes are assigned in the order labels are first seen during `fit`. The encoder is persisted as
/// the plain list of its classes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LabelEncoder {
    /// Class labels, indexed by code
    classes: Vec<String>,

    /// A mapping from class labels to codes
    label2id: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Learn the set of classes from a sequence of labels
    pub fn fit<'a, I>(labels: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::try_from(first_seen(labels))
    }

    /// Convert a label into its code
    pub fn encode(&self, label: &str) -> Result<usize, ModelError> {
        self.label2id
            .get(label)
            .copied()
            .ok_or_else(|| ModelError::UnknownLabel(label.to_string()))
    }

    /// Convert a sequence of labels into codes
    pub fn encode_all<'a, I>(&self, labels: I) -> Result<Vec<usize>, ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().map(|label| self.encode(label)).collect()
    }

    /// Convert a code back into its label
    pub fn decode(&self, code: usize) -> Result<&str, ModelError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass(code))
    }

    /// The known class labels, ordered by code
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of known classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if no classes are known
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TryFrom<Vec<String>> for LabelEncoder {
    type Error = ModelError;

    fn try_from(classes: Vec<String>) -> Result<Self, Self::Error> {
        if classes.is_empty() {
            return Err(ModelError::NotBinary(0));
        }

        let label2id: HashMap<String, usize> = invert_map(classes.iter().cloned().enumerate());

        if label2id.len() != classes.len() {
            return Err(ModelError::DuplicateLabel);
        }

        Ok(Self { classes, label2id })
    }
}

impl From<LabelEncoder> for Vec<String> {
    fn from(encoder: LabelEncoder) -> Self {
        encoder.classes
    }
}

impl Artifact for LabelEncoder {
    const FILE_NAME: &'static str = "label_encoder.json";
}
