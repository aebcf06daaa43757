//! Home and configuration directory helpers

use crate::error::{Error, Result};
use camino::Utf8PathBuf;

/// Name of the per-user configuration directory and of the per-project
/// metadata directory
pub const PURO_DIR_NAME: &str = ".puro";

/// Get the user's home directory
///
/// Prefers the HOME environment variable over `dirs::home_dir()` so that an
/// overridden HOME (containers, tests) is respected.
pub fn get_home_dir() -> Result<Utf8PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(Utf8PathBuf::from(home));
    }

    let home = dirs::home_dir()
        .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
    Utf8PathBuf::from_path_buf(home)
        .map_err(|p| Error::invalid_config(format!("Home directory is not UTF-8: {}", p.display())))
}

/// Get the puro configuration directory (~/.puro)
pub fn get_puro_dir() -> Result<Utf8PathBuf> {
    Ok(get_home_dir()?.join(PURO_DIR_NAME))
}
