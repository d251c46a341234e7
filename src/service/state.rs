use std::{collections::BTreeMap, path::Path};

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::{
    models::ArtifactError,
    pipelines::text_classification::{Analysis, ModelBundle},
};

use super::error::ServiceError;

/// Whether the artifacts were loaded at startup
#[derive(Debug)]
pub enum ModelState {
    /// Loading failed; every analysis is refused
    NotReady,

    /// The artifacts are loaded and immutable
    Ready(ModelBundle),
}

/// Shared, read-only state handed to every request
#[derive(Debug)]
pub struct AppContext {
    state: ModelState,
}

/// Response of the health check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `healthy` while the process answers
    pub status: String,

    /// True once the artifacts are loaded
    pub models_loaded: bool,
}

/// Response of the root endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Service name
    pub message: String,

    /// Crate version
    pub version: String,

    /// Endpoint paths and what they do
    pub endpoints: BTreeMap<String, String>,
}

impl AppContext {
    /// Wrap a model state
    pub fn new(state: ModelState) -> Self {
        Self { state }
    }

    /// A context serving the given artifacts
    pub fn ready(bundle: ModelBundle) -> Self {
        Self::new(ModelState::Ready(bundle))
    }

    /// A context whose artifacts failed to load
    pub fn not_ready() -> Self {
        Self::new(ModelState::NotReady)
    }

    /// Settle the startup transition from the outcome of loading the artifacts
    pub fn from_load(result: Result<ModelBundle, ArtifactError>) -> Self {
        match result {
            Ok(bundle) => {
                info!("Models loaded successfully");

                Self::ready(bundle)
            }
            Err(err) => {
                error!("Error loading models: {}", err);

                Self::not_ready()
            }
        }
    }

    /// Load the artifacts from a directory, ending up `NotReady` if that fails
    pub fn load(models_dir: &Path) -> Self {
        Self::from_load(ModelBundle::load(models_dir))
    }

    /// True if the artifacts are loaded
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    /// Classify a piece of text. Missing or blank text is rejected before readiness is checked.
    pub fn analyze(&self, text: Option<&str>) -> Result<Analysis, ServiceError> {
        let text = text
            .filter(|text| !text.trim().is_empty())
            .ok_or(ServiceError::Validation)?;

        let ModelState::Ready(bundle) = &self.state else {
            return Err(ServiceError::Unavailable);
        };

        Ok(bundle.analyze(text)?)
    }

    /// Report liveness and readiness
    pub fn health(&self) -> Health {
        Health {
            status: "healthy".to_string(),
            models_loaded: self.is_ready(),
        }
    }

    /// Describe the service
    pub fn info() -> Info {
        let endpoints = [
            ("/analyze", "POST - Analyze news text"),
            ("/health", "GET - Health check"),
        ]
        .into_iter()
        .map(|(path, description)| (path.to_string(), description.to_string()))
        .collect();

        Info {
            message: "TruthLens API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_blank_text_is_rejected_first() {
        let context = AppContext::not_ready();

        for text in [None, Some(""), Some("   \n\t")] {
            assert!(matches!(context.analyze(text), Err(ServiceError::Validation)));
        }
    }

    #[test]
    fn test_not_ready_refuses_analysis() {
        let context = AppContext::not_ready();

        assert!(matches!(
            context.analyze(Some("Senate passes budget")),
            Err(ServiceError::Unavailable)
        ));
    }

    #[test]
    fn test_failed_load_is_not_ready() {
        let context = AppContext::load(&PathBuf::from("/nonexistent/truthlens/models"));

        assert!(!context.is_ready());
        assert_eq!(
            context.health(),
            Health {
                status: "healthy".to_string(),
                models_loaded: false
            }
        );
    }

    #[test]
    fn test_info() {
        let info = AppContext::info();

        assert_eq!(info.message, "TruthLens API");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            info.endpoints.get("/analyze").map(String::as_str),
            Some("POST - Analyze news text")
        );
        assert_eq!(info.endpoints.len(), 2);
    }
}
