use std::path::PathBuf;

/// Default bind address
pub static DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5000;

/// Default artifact directory
pub static DEFAULT_MODELS_DIR: &str = "models";

/// Where the service listens and which artifacts it serves
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Directory holding the fitted artifacts
    pub models_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
        }
    }
}

impl ServiceConfig {
    /// Read `HOST`, `PORT` and `MODELS_DIR` from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable lookup, falling back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?;
        }

        if let Some(models_dir) = lookup("MODELS_DIR") {
            config.models_dir = PathBuf::from(models_dir);
        }

        Ok(config)
    }

    /// The `host:port` socket address to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Config Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// PORT is not a valid port number
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.address(), "0.0.0.0:5000");
        assert_eq!(config.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MODELS_DIR", "/srv/models"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
