use std::{fmt::Display, path::Path};

use async_trait::async_trait;
use burn::data::dataset::{self, Dataset as _, InMemDataset};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::pipelines::text_classification;

use super::{DatasetError, LoadableDataset};

/// The default location of the merged training set
pub static DEFAULT_PATH: &str = "data/train.csv";

/// The provenance label of a news article
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// The article came from the fake news source
    #[serde(rename = "FAKE")]
    Fake,

    /// The article came from the real news source
    #[serde(rename = "REAL")]
    Real,
}

impl Label {
    /// The label as written in datasets and API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "FAKE",
            Label::Real => "REAL",
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A labeled news article
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct Item {
    /// The raw article text
    pub text: String,

    /// The article label
    pub label: Label,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.text
    }

    fn class_label(&self) -> &str {
        self.label.as_str()
    }
}

/// Struct for the merged news dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the news dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    /// Reads a CSV file with `text` and `label` columns
    async fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = csv::ReaderBuilder::new();

        let dataset: InMemDataset<Item> =
            InMemDataset::from_csv(path, &reader).map_err(|source| DatasetError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!("Loaded {} articles from {}", dataset.len(), path.display());

        Ok(Self { dataset })
    }
}

impl Dataset {
    /// Wraps already loaded items
    #[cfg(test)]
    pub(crate) fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }
}
