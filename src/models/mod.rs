/// Sparse feature vectors
pub mod sparse;

/// Persisting fitted objects
pub mod artifact;

/// TF-IDF vectorizer
pub mod tfidf;

/// Passive-aggressive linear classifier
pub mod passive_aggressive;

/// Label encoder
pub mod label_encoder;

pub use artifact::{Artifact, ArtifactError};
pub use label_encoder::LabelEncoder;
pub use passive_aggressive::{PassiveAggressive, PassiveAggressiveConfig};
pub use sparse::SparseVector;
pub use tfidf::{TfIdfConfig, TfIdfVectorizer};

/// Model Error
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// Nothing to fit on
    #[error("cannot fit on an empty corpus")]
    EmptyCorpus,

    /// The corpus contained no usable terms
    #[error("the corpus produced no terms to build a vocabulary from")]
    EmptyVocabulary,

    /// Vectors and targets must pair up
    #[error("got {vectors} vectors but {targets} targets")]
    LengthMismatch {
        /// Number of vectors
        vectors: usize,
        /// Number of targets
        targets: usize,
    },

    /// Binary classification needs exactly two classes
    #[error("expected 2 classes, found {0}")]
    NotBinary(usize),

    /// A label appeared more than once in the class list
    #[error("duplicate class label")]
    DuplicateLabel,

    /// A label outside the fitted classes
    #[error("unknown label {0}")]
    UnknownLabel(String),

    /// A class code outside the fitted classes
    #[error("unknown class code {0}")]
    UnknownClass(usize),

    /// The classifier and vectorizer disagree on the number of features
    #[error("classifier expects {classifier} features but the vocabulary has {vocabulary}")]
    FeatureMismatch {
        /// Features seen by the classifier
        classifier: usize,
        /// Size of the fitted vocabulary
        vocabulary: usize,
    },

    /// The vectorizer's vocabulary and IDF weights do not line up
    #[error("vocabulary of {vocabulary} terms does not match {idf} IDF weights")]
    CorruptVocabulary {
        /// Number of vocabulary terms
        vocabulary: usize,
        /// Number of IDF weights
        idf: usize,
    },

    /// The classifier produced NaN or infinity
    #[error("decision score is not finite")]
    NonFiniteScore,
}
