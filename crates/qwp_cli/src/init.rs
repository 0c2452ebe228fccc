//! `qwp init` — writes a `qwp.toml` with every setting at its default.

use std::fs;
use std::path::{Path, PathBuf};

use qwp_config::{QwpConfig, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Runs the `qwp init` command.
///
/// Refuses to overwrite an existing `qwp.toml`. Returns exit code 0 on
/// success.
pub fn run(dir: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let dir = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    let path = write_default_config(&dir)?;
    if !global.quiet {
        eprintln!("     Created {}", path.display());
    }
    Ok(0)
}

fn write_default_config(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()).into());
    }
    fs::create_dir_all(dir)?;
    let content = toml::to_string_pretty(&QwpConfig::default())?;
    fs::write(&path, content)?;
    Ok(path)
}
