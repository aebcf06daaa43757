//! Runtime configuration types for the create-project pipeline
//!
//! These types define configuration that controls where templates are
//! fetched from, how the project's dependencies are installed, and what
//! happens to the downloaded archive afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Template source settings
    #[serde(default)]
    pub template: TemplateConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Dependency installation settings
    #[serde(default)]
    pub install: InstallConfig,

    /// Downloaded archive handling
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Template source settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Template used when the caller does not name one (`owner/repo`)
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Archive URL pattern with `{template}` and `{branch}` placeholders
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            archive_url: default_archive_url(),
        }
    }
}

/// Built-in template reference
pub const DEFAULT_TEMPLATE: &str = "puro-framework/puro-skeleton";

/// Branch every template archive is fetched from
pub const DEFAULT_BRANCH: &str = "master";

/// Source-hosting archive URL pattern
pub const DEFAULT_ARCHIVE_URL: &str = "https://github.com/{template}/archive/{branch}.tar.gz";

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}
fn default_archive_url() -> String {
    DEFAULT_ARCHIVE_URL.to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "puro/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Dependency installation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InstallConfig {
    /// Run the package manager after extraction
    #[serde(default = "default_install_enabled")]
    pub enabled: bool,

    /// Package manager executable
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    /// Arguments passed to the package manager; `{target}` is replaced
    /// with the project directory
    #[serde(default = "default_install_args")]
    pub args: Vec<String>,

    /// What a non-zero package manager exit status means
    #[serde(default)]
    pub exit_status: ExitStatusPolicy,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: default_install_enabled(),
            package_manager: default_package_manager(),
            args: default_install_args(),
            exit_status: ExitStatusPolicy::default(),
        }
    }
}

fn default_install_enabled() -> bool {
    true
}
fn default_package_manager() -> String {
    "npm".to_string()
}
fn default_install_args() -> Vec<String> {
    vec![
        "install".to_string(),
        "--prefix".to_string(),
        "{target}".to_string(),
    ]
}

/// Handling of a package manager that exits non-zero
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ExitStatusPolicy {
    /// Treat any exit status as success
    Ignore,

    /// Log a warning and carry on (default)
    #[default]
    Warn,

    /// Fail the command
    Fail,
}

impl fmt::Display for ExitStatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatusPolicy::Ignore => write!(f, "ignore"),
            ExitStatusPolicy::Warn => write!(f, "warn"),
            ExitStatusPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for ExitStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(ExitStatusPolicy::Ignore),
            "warn" => Ok(ExitStatusPolicy::Warn),
            "fail" => Ok(ExitStatusPolicy::Fail),
            other => Err(format!(
                "unknown exit status policy '{}' (expected ignore, warn or fail)",
                other
            )),
        }
    }
}

/// Downloaded archive handling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ArchiveConfig {
    /// Leave `.puro/template.tar.gz` on disk after extraction
    #[serde(default = "default_keep_after_extract")]
    pub keep_after_extract: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            keep_after_extract: default_keep_after_extract(),
        }
    }
}

fn default_keep_after_extract() -> bool {
    true
}
