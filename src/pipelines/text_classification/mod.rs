/// Text Classification Items
pub mod item;

/// Text normalization
pub mod normalizer;

/// Evaluation metrics
pub mod metrics;

/// Training configuration
pub mod config;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use config::Config;
pub use inference::{Analysis, ModelBundle, Prediction};
pub use item::Item;
pub use normalizer::clean_text;
pub use training::{save, train, Evaluation, Output};
