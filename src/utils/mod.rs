/// English stopwords
pub mod stopwords;

/// Noun lemmatization
pub mod lemmatizer;

/// Utilities for classification tasks
pub mod classes;
