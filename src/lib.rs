//! # TruthLens
//!
//! A fake news classifier: text normalization, a TF-IDF vectorizer and a passive-aggressive
//! linear classifier, with tools to merge the training data, train the model and serve it over
//! HTTP.
#![forbid(unsafe_code)]

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// HTTP inference service
pub mod service;

/// Utilities
pub mod utils;
