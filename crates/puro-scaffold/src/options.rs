//! Typed options for a create-project run

use puro_core::types::{ExitStatusPolicy, RuntimeConfig, DEFAULT_BRANCH};

/// Options for creating a project from a template
///
/// Built from the resolved [`RuntimeConfig`] and then adjusted with the
/// `with_*` methods for command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProjectOptions {
    /// Template identifier (`owner/repo`)
    pub template: String,
    /// Branch whose archive is downloaded, always [`DEFAULT_BRANCH`]
    pub branch: String,
    /// Archive URL pattern with `{template}` and `{branch}` placeholders
    pub archive_url: String,
    /// User agent for the download request
    pub user_agent: String,
    /// Run the package manager after extraction
    pub install: bool,
    /// Package manager executable
    pub package_manager: String,
    /// Package manager arguments, `{target}` is substituted
    pub install_args: Vec<String>,
    /// Handling of a non-zero package manager exit status
    pub exit_status: ExitStatusPolicy,
    /// Keep the downloaded archive after extraction
    pub keep_archive: bool,
}

impl CreateProjectOptions {
    /// Create options from runtime configuration
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            template: config.template.default_template.clone(),
            branch: DEFAULT_BRANCH.to_string(),
            archive_url: config.template.archive_url.clone(),
            user_agent: config.network.user_agent.clone(),
            install: config.install.enabled,
            package_manager: config.install.package_manager.clone(),
            install_args: config.install.args.clone(),
            exit_status: config.install.exit_status,
            keep_archive: config.archive.keep_after_extract,
        }
    }

    /// Use the given template, or keep the configured default when `None`
    pub fn with_template(mut self, template: Option<String>) -> Self {
        if let Some(template) = template {
            self.template = template;
        }
        self
    }

    /// Enable or disable dependency installation
    pub fn with_install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    /// Use a different package manager executable
    pub fn with_package_manager(mut self, program: impl Into<String>) -> Self {
        self.package_manager = program.into();
        self
    }

    /// Set the exit status policy for the package manager
    pub fn with_exit_status(mut self, policy: ExitStatusPolicy) -> Self {
        self.exit_status = policy;
        self
    }

    /// Keep or remove the archive after extraction
    pub fn with_keep_archive(mut self, keep: bool) -> Self {
        self.keep_archive = keep;
        self
    }

    /// Point downloads at a different archive URL pattern
    pub fn with_archive_url(mut self, pattern: impl Into<String>) -> Self {
        self.archive_url = pattern.into();
        self
    }
}

impl Default for CreateProjectOptions {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}
