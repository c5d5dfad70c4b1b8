//! Configuration module for the shipment E2E harness
//!
//! Handles loading and parsing of the YAML harness configuration with support
//! for environment variable expansion and validation. Every field has a
//! default matching the shipment-list deployment, so `harness.yaml` is
//! optional and only needed to override single values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in a string.
///
/// Supports two syntaxes:
/// - `${VAR_NAME}` - Simple expansion, keeps placeholder if var not found
/// - `${VAR_NAME:-default}` - Expansion with default value
///
/// Variable names must start with a letter or underscore and contain only
/// uppercase letters, digits, and underscores.
pub(crate) fn expand_env_vars(s: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]+))?\}").unwrap();
    let mut last_match = 0;
    let mut result = String::with_capacity(s.len());

    for cap in re.captures_iter(s) {
        let full_match = cap.get(0).unwrap();
        let var_name = cap.get(1).unwrap().as_str();

        result.push_str(&s[last_match..full_match.start()]);

        let value = match std::env::var(var_name) {
            Ok(val) => val,
            Err(_) => {
                if let Some(default) = cap.get(2) {
                    default.as_str().to_string()
                } else {
                    // No env var and no default. Keep the original placeholder.
                    full_match.as_str().to_string()
                }
            }
        };
        result.push_str(&value);

        last_match = full_match.end();
    }

    result.push_str(&s[last_match..]);

    result
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub emulator: EmulatorConfig,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            emulator: EmulatorConfig::default(),
            bucket: default_bucket(),
            fixtures: FixturesConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_http_url(&self.service.base_url) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid service base URL '{}': must start with http:// or https://",
                self.service.base_url
            )));
        }

        if self.bucket.is_empty() {
            return Err(ConfigError::ValidationError(
                "Bucket name must not be empty".into(),
            ));
        }

        if self.emulator.image.is_empty() || self.emulator.tag.is_empty() {
            return Err(ConfigError::ValidationError(
                "Emulator image and tag must not be empty".into(),
            ));
        }

        if self.emulator.edge_port == 0 {
            return Err(ConfigError::ValidationError(
                "Emulator edge port must be non-zero".into(),
            ));
        }

        if self.emulator.ready_message.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Emulator ready message must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Service under test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL the REST surface listens on
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional command line used to launch the service. When absent the
    /// harness attaches to an already-running instance.
    #[serde(default)]
    pub launch_command: Option<String>,

    /// Seconds to wait for the service to answer on `base_url`. Default: 60
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            launch_command: None,
            ready_timeout_secs: default_ready_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_ready_timeout() -> u64 {
    60
}

/// LocalStack emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Container image name. Default: "localstack/localstack-pro"
    #[serde(default = "default_image")]
    pub image: String,

    /// Container image tag. Default: "3.0.1"
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Edge port all emulated services listen on inside the container.
    /// Default: 4566
    #[serde(default = "default_edge_port")]
    pub edge_port: u16,

    /// Host directory holding the seeded state snapshot, bind-mounted into
    /// the emulator's auto-import path. Default: "testdata/shipment-list-pod"
    #[serde(default = "default_seed_pod")]
    pub seed_pod: String,

    /// Log line that declares the seeded emulator ready
    #[serde(default = "default_ready_message")]
    pub ready_message: String,

    /// Seconds to wait for the ready message. Default: 120
    #[serde(default = "default_startup_timeout")]
    pub startup_timeout_secs: u64,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            tag: default_tag(),
            edge_port: default_edge_port(),
            seed_pod: default_seed_pod(),
            ready_message: default_ready_message(),
            startup_timeout_secs: default_startup_timeout(),
        }
    }
}

fn default_image() -> String {
    "localstack/localstack-pro".to_string()
}

fn default_tag() -> String {
    "3.0.1".to_string()
}

fn default_edge_port() -> u16 {
    4566
}

fn default_seed_pod() -> String {
    "testdata/shipment-list-pod".to_string()
}

fn default_ready_message() -> String {
    "Loaded services from local state file".to_string()
}

fn default_startup_timeout() -> u64 {
    120
}

fn default_bucket() -> String {
    "shipment-picture-bucket-lenient-crab".to_string()
}

/// Test fixture locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesConfig {
    /// Directory holding cat.jpg, shipment.json and shipmentToUpload.json
    #[serde(default = "default_fixtures_dir")]
    pub dir: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: default_fixtures_dir(),
        }
    }
}

fn default_fixtures_dir() -> String {
    "testdata".to_string()
}
