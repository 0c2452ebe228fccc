//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::QwpConfig;
use std::path::Path;

/// The file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "qwp.toml";

/// Loads and validates a configuration file.
///
/// `path` may name the file itself or a directory containing `qwp.toml`.
pub fn load_config(path: &Path) -> Result<QwpConfig, ConfigError> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `qwp.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<QwpConfig, ConfigError> {
    let config: QwpConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects values the placer cannot run with.
fn validate_config(config: &QwpConfig) -> Result<(), ConfigError> {
    let placer = &config.placer;
    if placer.grid_divisions == 0 {
        return Err(ConfigError::ValidationError(
            "placer.grid_divisions must be at least 1".to_string(),
        ));
    }
    // xorshift never leaves the all-zero state
    if placer.seed == 0 {
        return Err(ConfigError::ValidationError(
            "placer.seed must be non-zero".to_string(),
        ));
    }
    if placer.max_net_degree < 2 {
        return Err(ConfigError::ValidationError(
            "placer.max_net_degree must be at least 2".to_string(),
        ));
    }
    Ok(())
}
