//! TF-IDF vectorization over unigrams and bigrams.
//!
//! The vocabulary keeps the `max_features` most frequent n-grams of the training corpus. Feature
//! indices follow the alphabetical order of the kept terms, and IDF weights are smoothed as
//! `ln((1 + n) / (1 + df)) + 1`. Transformed vectors are L2 normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{artifact::Artifact, sparse::SparseVector, ModelError};

/// Vectorizer hyper-parameters
#[derive(burn::config::Config, Debug)]
pub struct TfIdfConfig {
    /// Maximum vocabulary size
    #[config(default = 50000)]
    pub max_features: usize,

    /// Smallest n-gram length
    #[config(default = 1)]
    pub ngram_min: usize,

    /// Largest n-gram length
    #[config(default = 2)]
    pub ngram_max: usize,

    /// Tokens shorter than this are ignored
    #[config(default = 2)]
    pub min_token_len: usize,
}

impl TfIdfConfig {
    /// Split cleaned text into the n-gram terms counted by the vectorizer
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .filter(|token| token.chars().count() >= self.min_token_len)
            .collect();

        let mut terms = Vec::new();

        for n in self.ngram_min.max(1)..=self.ngram_max {
            if n == 1 {
                terms.extend(tokens.iter().map(|token| token.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|window| window.join(" ")));
            }
        }

        terms
    }
}

/// A fitted TF-IDF vectorizer. Its vocabulary is frozen once `fit` returns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// The configuration used during fitting
    config: TfIdfConfig,

    /// A mapping from terms to feature indices
    vocabulary: HashMap<String, u32>,

    /// Inverse document frequency per feature index
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Learn the vocabulary and IDF weights from a corpus of cleaned documents
    pub fn fit<S: AsRef<str>>(config: TfIdfConfig, corpus: &[S]) -> Result<Self, ModelError> {
        if corpus.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        // Count every term across the whole corpus
        let mut term_counts: HashMap<String, u64> = HashMap::new();

        for document in corpus {
            for term in config.terms(document.as_ref()) {
                *term_counts.entry(term).or_default() += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }

        debug!("Found {} distinct terms", term_counts.len());

        // Keep the most frequent terms, breaking ties alphabetically
        let mut ranked: Vec<(String, u64)> = term_counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let vocabulary: HashMap<String, u32> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index as u32))
            .collect();

        // Document frequency of each kept term
        let mut document_frequency = vec![0u64; vocabulary.len()];

        for document in corpus {
            let present: HashSet<u32> = config
                .terms(document.as_ref())
                .iter()
                .filter_map(|term| vocabulary.get(term).copied())
                .collect();

            for index in present {
                document_frequency[index as usize] += 1;
            }
        }

        let n_documents = corpus.len() as f64;

        let idf = document_frequency
            .into_iter()
            .map(|df| ((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        info!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            vocabulary.len(),
            corpus.len()
        );

        Ok(Self {
            config,
            vocabulary,
            idf,
        })
    }

    /// Map cleaned text onto the fitted vocabulary. Unknown terms are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<u32, f64> = BTreeMap::new();

        for term in self.config.terms(text) {
            if let Some(index) = self.feature_index(&term) {
                *counts.entry(index as u32).or_default() += 1.0;
            }
        }

        let mut vector = SparseVector::from_sorted(counts.into_iter().filter_map(|(index, count)| {
            self.idf
                .get(index as usize)
                .map(|idf| (index, count * idf))
        }));

        vector.l2_normalize();

        vector
    }

    /// Transform a batch of documents
    pub fn transform_all<S: AsRef<str>>(&self, corpus: &[S]) -> Vec<SparseVector> {
        corpus
            .iter()
            .map(|document| self.transform(document.as_ref()))
            .collect()
    }

    /// Check that every vocabulary term has its own index with a finite IDF weight
    pub fn validate(&self) -> Result<(), ModelError> {
        let corrupt = || ModelError::CorruptVocabulary {
            vocabulary: self.vocabulary.len(),
            idf: self.idf.len(),
        };

        if self.vocabulary.is_empty() || self.idf.len() != self.vocabulary.len() {
            return Err(corrupt());
        }

        let indices: HashSet<u32> = self.vocabulary.values().copied().collect();

        if indices.len() != self.vocabulary.len()
            || indices.iter().any(|index| *index as usize >= self.idf.len())
            || self.idf.iter().any(|idf| !idf.is_finite())
        {
            return Err(corrupt());
        }

        Ok(())
    }

    /// Number of features in the fitted vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Look up the feature index of a term
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).map(|index| *index as usize)
    }

    /// The vocabulary terms ordered by feature index
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, u32)> = self
            .vocabulary
            .iter()
            .map(|(term, index)| (term.as_str(), *index))
            .collect();

        names.sort_unstable_by_key(|(_, index)| *index);

        names.into_iter().map(|(term, _)| term).collect()
    }

    /// The IDF weight of each feature
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}

impl Artifact for TfIdfVectorizer {
    const FILE_NAME: &'static str = "tfidf.json";
}
