//! XDG-style path resolution for the configuration directory.
//!
//! `XDG_CONFIG_HOME` is honored on every platform so that the config file
//! lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "langassist";

/// Returns the configuration directory for langassist.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/langassist` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/langassist` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}
