use crate::{
    datasets::news,
    models::{PassiveAggressiveConfig, TfIdfConfig},
};

/// Default directory for the fitted artifacts
pub static DEFAULT_ARTIFACT_DIR: &str = "models";

/// File name of the saved training configuration
pub static CONFIG_FILE: &str = "config.json";

/// Define configuration struct for a training run
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Vectorizer hyper-parameters
    #[config(default = "TfIdfConfig::new()")]
    pub vectorizer: TfIdfConfig,

    /// Classifier hyper-parameters
    #[config(default = "PassiveAggressiveConfig::new()")]
    pub classifier: PassiveAggressiveConfig,

    /// Fraction of each class held out for evaluation
    #[config(default = 0.2)]
    pub test_size: f64,

    /// Seed for the train/test split
    #[config(default = 42)]
    pub seed: u64,

    /// Path to the merged training CSV
    #[config(default = "news::DEFAULT_PATH.to_string()")]
    pub data_path: String,

    /// Directory to write the fitted artifacts into
    #[config(default = "DEFAULT_ARTIFACT_DIR.to_string()")]
    pub artifact_dir: String,
}
