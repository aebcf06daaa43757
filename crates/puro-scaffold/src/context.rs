//! Per-invocation project context
//!
//! All paths and the archive URL are derived once, before any step runs,
//! and are never changed afterwards.

use crate::error::{Error, Result};
use crate::options::CreateProjectOptions;
use crate::template_url::build_archive_url;
use camino::{Utf8Path, Utf8PathBuf};
use puro_core::PURO_DIR_NAME;
use std::fs;
use std::io::ErrorKind;
use tracing::debug;

/// File name of the downloaded archive inside the metadata directory
pub const TEMPLATE_FILE_NAME: &str = "template.tar.gz";

/// Immutable values shared by every step of a create-project run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    target_dir: Utf8PathBuf,
    metadata_dir: Utf8PathBuf,
    template: String,
    archive_url: String,
    archive_path: Utf8PathBuf,
}

impl ProjectContext {
    /// Resolve the context for `target`
    ///
    /// Fails with [`Error::TargetNotFound`] when the directory does not
    /// exist. Performs no writes.
    pub fn resolve(target: impl AsRef<Utf8Path>, options: &CreateProjectOptions) -> Result<Self> {
        let target_dir = resolve_target_dir(target.as_ref())?;
        let metadata_dir = metadata_dir_for(&target_dir);
        let archive_path = metadata_dir.join(TEMPLATE_FILE_NAME);
        let archive_url = build_archive_url(&options.archive_url, &options.template, &options.branch);

        debug!(
            "Resolved project context: target={}, url={}",
            target_dir, archive_url
        );

        Ok(Self {
            target_dir,
            metadata_dir,
            template: options.template.clone(),
            archive_url,
            archive_path,
        })
    }

    /// Absolute project directory
    pub fn target_dir(&self) -> &Utf8Path {
        &self.target_dir
    }

    /// `<target>/.puro`
    pub fn metadata_dir(&self) -> &Utf8Path {
        &self.metadata_dir
    }

    /// Template identifier the URL was built from
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Fully substituted archive URL
    pub fn archive_url(&self) -> &str {
        &self.archive_url
    }

    /// `<target>/.puro/template.tar.gz`
    pub fn archive_path(&self) -> &Utf8Path {
        &self.archive_path
    }
}

/// Validate that `target` is an existing directory and make it absolute
pub fn resolve_target_dir(target: &Utf8Path) -> Result<Utf8PathBuf> {
    let canonical = match fs::canonicalize(target) {
        Ok(path) => path,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::target_not_found(target.as_str()))
        }
        Err(e) => return Err(e.into()),
    };

    if !canonical.is_dir() {
        return Err(Error::target_not_directory(target.as_str()));
    }

    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|p| Error::invalid_path(p.display().to_string()))
}

/// Path of the metadata directory for a target
pub fn metadata_dir_for(target_dir: &Utf8Path) -> Utf8PathBuf {
    target_dir.join(PURO_DIR_NAME)
}

/// Create the metadata directory if it does not exist yet
///
/// Safe to call repeatedly.
pub async fn ensure_metadata_dir(metadata_dir: &Utf8Path) -> Result<()> {
    if !tokio::fs::try_exists(metadata_dir).await? {
        debug!("Creating metadata directory {}", metadata_dir);
    }
    tokio::fs::create_dir_all(metadata_dir).await?;
    Ok(())
}
