//! # Configuration
//!
//! Layered settings, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. TOML file (`journey.toml` in the working directory, or `--config <path>`)
//! 3. Environment (`JOURNEY_STORE`, `JOURNEY_ADMIN_KEY`)
//! 4. Command-line flags (`--store`)
//!
//! ```toml
//! store_path = "birthday_feedbacks_admin.json"
//! admin_key = "change-me"
//! tick_interval_ms = 25
//! ```

use journey_core::JourneyError;
use journey_core::primitives::{DEFAULT_ADMIN_KEY, FEEDBACK_STORAGE_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "journey.toml";

/// Environment variable overriding the feedback store path.
pub const ENV_STORE: &str = "JOURNEY_STORE";

/// Environment variable overriding the admin passphrase.
pub const ENV_ADMIN_KEY: &str = "JOURNEY_ADMIN_KEY";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JourneyConfig {
    /// JSON file holding the feedback records.
    pub store_path: PathBuf,
    /// Passphrase guarding the message viewer.
    pub admin_key: String,
    /// How often the terminal loop ticks the timeline.
    pub tick_interval_ms: u64,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(format!("{}.json", FEEDBACK_STORAGE_KEY)),
            admin_key: DEFAULT_ADMIN_KEY.to_string(),
            tick_interval_ms: 25,
        }
    }
}

impl JourneyConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, JourneyError> {
        let config: Self =
            toml::from_str(text).map_err(|e| JourneyError::ConfigError(e.to_string()))?;
        config.validate()
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, JourneyError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            JourneyError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(JourneyError::ConfigError(format!(
                "Config file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            JourneyError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then the config file.
    ///
    /// An explicit path must exist; the implicit `journey.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, JourneyError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides from an arbitrary lookup. Empty values are
    /// ignored.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(store) = var(ENV_STORE) {
            self.store_path = PathBuf::from(store);
        }
        if let Some(key) = var(ENV_ADMIN_KEY) {
            self.admin_key = key;
        }
        self
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_store(mut self, store: Option<PathBuf>) -> Self {
        if let Some(path) = store {
            self.store_path = path;
        }
        self
    }

    /// Tick period for the terminal loop.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(self) -> Result<Self, JourneyError> {
        if self.tick_interval_ms == 0 {
            return Err(JourneyError::ConfigError(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.admin_key.trim().is_empty() {
            return Err(JourneyError::ConfigError(
                "admin_key must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
