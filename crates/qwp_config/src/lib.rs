//! Parsing and validation of `qwp.toml` placer configuration files.
//!
//! Produces a strongly-typed [`QwpConfig`] whose [`PlacerConfig`] section is
//! what the placement engine consumes. Every key is optional; a missing file
//! section yields the documented defaults.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
