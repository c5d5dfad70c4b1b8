//! Configuration loader with environment variable expansion

use super::{expand_env_vars, ConfigError, HarnessConfig};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<HarnessConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&content);
        let config: HarnessConfig = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }
}
