//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.puro/config.yaml)
//! 3. Environment variables (PURO_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use crate::utils::get_puro_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// User configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at the user's config directory (~/.puro)
    pub fn new() -> Result<Self> {
        let config_dir = get_puro_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let user_config_path = self.config_dir.join(CONFIG_FILE_NAME);
        if user_config_path.exists() {
            debug!("Loading user config from {}", user_config_path);
            let file_config = self.load_yaml_file::<RuntimeConfig>(&user_config_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        config = self.apply_env_overrides(config)?;

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge two runtime configs (base is overridden by overlay, per section)
    fn merge_runtime_config(base: RuntimeConfig, overlay: RuntimeConfig) -> RuntimeConfig {
        let mut install = overlay.install;
        // An empty argument list would run the package manager bare
        if install.args.is_empty() {
            install.args = base.install.args;
        }

        RuntimeConfig {
            template: overlay.template,
            network: overlay.network,
            install,
            archive: overlay.archive,
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        // Template source
        if let Ok(val) = env::var("PURO_DEFAULT_TEMPLATE") {
            config.template.default_template = val;
        }

        if let Ok(val) = env::var("PURO_ARCHIVE_URL") {
            config.template.archive_url = val;
        }

        if let Ok(val) = env::var("PURO_USER_AGENT") {
            config.network.user_agent = val;
        }

        // Dependency installation
        if let Ok(val) = env::var("PURO_PACKAGE_MANAGER") {
            config.install.package_manager = val;
        }

        if let Ok(val) = env::var("PURO_SKIP_INSTALL") {
            let skip: bool = val
                .parse()
                .map_err(|_| Error::invalid_config("PURO_SKIP_INSTALL must be true or false"))?;
            config.install.enabled = !skip;
        }

        if let Ok(val) = env::var("PURO_INSTALL_EXIT_STATUS") {
            config.install.exit_status = val.parse().map_err(|e: String| {
                Error::invalid_config(format!("PURO_INSTALL_EXIT_STATUS: {}", e))
            })?;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
