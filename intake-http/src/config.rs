use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Production endpoint of the assessment API.
pub const DEFAULT_ENDPOINT: &str =
    "https://jerniefit-client-assessment-api.o-497.workers.dev/api/submit-assessment";

/// Host of the messaging app used for the post-submission deep link.
pub const DEFAULT_MESSAGING_HOST: &str = "wa.me";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "INTAKE_ENDPOINT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Config value '{key}' must not be empty")]
    Empty { key: &'static str },
}

/// Settings for delivering answers and following up with the client.
///
/// ```yaml
/// endpoint: https://example.com/api/submit-assessment
/// messaging_host: wa.me
/// trainer_phone: "+34 600 000 000"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// URL the answer set is posted to.
    pub endpoint: String,

    /// Host of the chat deep link.
    pub messaging_host: String,

    /// Number the deep link opens a chat with. No link is offered without one.
    pub trainer_phone: Option<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            messaging_host: DEFAULT_MESSAGING_HOST.to_string(),
            trainer_phone: None,
        }
    }
}

impl IntakeConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded intake config");
        Self::from_yaml_str(&text)
    }

    /// Apply `INTAKE_ENDPOINT` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(endpoint = %endpoint, "endpoint overridden from environment");
            self.endpoint = endpoint;
        }
        self
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Empty { key: "endpoint" });
        }
        if self.messaging_host.trim().is_empty() {
            return Err(ConfigError::Empty {
                key: "messaging_host",
            });
        }
        Ok(())
    }
}
