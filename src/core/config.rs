//! Engine configuration.
//!
//! The hosting service configures the engine at startup from a TOML file.
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [registry]
//! max_sessions = 10000
//!
//! [onboarding]
//! message = "Welcome to checkers! Tap the button below to start a game:"
//! launch_label = "Play checkers"
//! launch_url = "https://github.com/Gmilitdinov/telegram-checkers/"
//!
//! [logging]
//! filter = "rust_checkers=info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default cap on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Session registry settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum live sessions before the least recently used one is evicted.
    /// `0` means unbounded.
    pub max_sessions: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Reply to a start/new game request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Greeting text.
    pub message: String,
    /// Label of the launch button.
    pub launch_label: String,
    /// Address the launch button opens.
    pub launch_url: String,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            message: "Welcome to checkers! Tap the button below to start a game:".to_string(),
            launch_label: "Play checkers".to_string(),
            launch_url: "https://github.com/Gmilitdinov/telegram-checkers/".to_string(),
        }
    }
}

/// Logging settings, consumed by the binary when installing a subscriber.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "rust_checkers=info".to_string(),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub registry: RegistryConfig,
    pub onboarding: OnboardingConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.onboarding.launch_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "onboarding.launch_url must not be empty".to_string(),
            });
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "logging.filter must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
