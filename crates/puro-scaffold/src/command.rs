//! The create-project pipeline
//!
//! Validate → ensure `.puro` → build URL → download → extract → install.
//! Steps run strictly in order and the first failure ends the run. Nothing
//! is rolled back: files already extracted stay when a later step fails.

use crate::context::{ensure_metadata_dir, ProjectContext};
use crate::download::ArchiveDownloader;
use crate::error::Result;
use crate::extract::{extract_archive, ExtractSummary};
use crate::install::{DependencyInstaller, InstallReport};
use crate::options::CreateProjectOptions;
use camino::Utf8Path;
use tracing::{debug, info};

/// Result of a successful create-project run
#[derive(Debug, Clone)]
pub struct CreateProjectReport {
    /// Paths and URL the run used
    pub context: ProjectContext,
    /// Size of the downloaded archive in bytes
    pub downloaded_bytes: u64,
    /// What extraction wrote
    pub extracted: ExtractSummary,
    /// Whether the archive is still on disk
    pub archive_kept: bool,
    /// Package manager outcome, `None` when installation was disabled
    pub install: Option<InstallReport>,
}

/// Creates a new project from a template archive
pub struct CreateProjectCommand {
    options: CreateProjectOptions,
    downloader: ArchiveDownloader,
    installer: DependencyInstaller,
}

impl CreateProjectCommand {
    /// Create the command from resolved options
    pub fn new(options: CreateProjectOptions) -> Result<Self> {
        let downloader = ArchiveDownloader::new(&options.user_agent)?;
        let installer =
            DependencyInstaller::new(options.package_manager.clone(), options.install_args.clone())
                .with_exit_status(options.exit_status);

        Ok(Self {
            options,
            downloader,
            installer,
        })
    }

    /// Run the pipeline for `target`
    pub async fn run(&self, target: impl AsRef<Utf8Path>) -> Result<CreateProjectReport> {
        let context = ProjectContext::resolve(target, &self.options)?;
        ensure_metadata_dir(context.metadata_dir()).await?;

        let downloaded_bytes = self
            .downloader
            .download(context.archive_url(), context.archive_path())
            .await?;

        let extracted = extract_archive(context.archive_path(), context.target_dir()).await?;
        info!(
            "Extracted {} entries into {}",
            extracted.written(),
            context.target_dir()
        );

        if !self.options.keep_archive {
            debug!("Removing {}", context.archive_path());
            tokio::fs::remove_file(context.archive_path()).await?;
        }

        let install = if self.options.install {
            Some(self.installer.install(context.target_dir()).await?)
        } else {
            debug!("Dependency installation disabled");
            None
        };

        Ok(CreateProjectReport {
            context,
            downloaded_bytes,
            extracted,
            archive_kept: self.options.keep_archive,
            install,
        })
    }
}
