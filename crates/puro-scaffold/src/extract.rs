//! Template archive extraction
//!
//! Unpacks a gzip-compressed tar archive into the project directory while
//! dropping leading path components, so the wrapper directory that source
//! hosts put around repository archives (`repo-master/`) disappears and its
//! contents land directly in the target.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Component, Path, PathBuf};
use tar::{Archive, Entry, EntryType};
use tracing::{debug, info};

/// Leading components removed from every archive entry
pub const STRIP_COMPONENTS: usize = 1;

/// Counts of what an extraction wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Regular files, links, and other non-directory entries
    pub files: usize,
    /// Directory entries
    pub directories: usize,
    /// Entries dropped because nothing was left after stripping
    pub skipped: usize,
}

impl ExtractSummary {
    /// Entries written to disk
    pub fn written(&self) -> usize {
        self.files + self.directories
    }
}

/// Extract `archive` into `target`, stripping one leading component
///
/// Runs on the blocking thread pool.
pub async fn extract_archive(archive: &Utf8Path, target: &Utf8Path) -> Result<ExtractSummary> {
    info!("Extract template ...");

    let archive: Utf8PathBuf = archive.to_owned();
    let target: Utf8PathBuf = target.to_owned();

    tokio::task::spawn_blocking(move || unpack_stripped(&archive, &target, STRIP_COMPONENTS))
        .await
        .map_err(|e| Error::extract(format!("extraction task failed: {}", e)))?
}

/// Unpack a `.tar.gz` into `target`, removing `strip` leading components
/// from every entry path
///
/// Nothing is written outside `target`. Entries whose path would pass
/// through a symlink leading out of it, and links pointing out of it, are
/// rejected.
pub fn unpack_stripped(archive: &Utf8Path, target: &Utf8Path, strip: usize) -> Result<ExtractSummary> {
    let file = File::open(archive)?;
    let root = fs::canonicalize(target)?;
    let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
    let mut summary = ExtractSummary::default();

    let entries = tar
        .entries()
        .map_err(|e| Error::extract(format!("{} is not a readable archive: {}", archive, e)))?;

    for entry in entries {
        let mut entry = entry
            .map_err(|e| Error::extract(format!("{} is not a valid tar.gz archive: {}", archive, e)))?;

        let entry_type = entry.header().entry_type();
        if matches!(entry_type, EntryType::XGlobalHeader | EntryType::XHeader) {
            summary.skipped += 1;
            continue;
        }

        let path = entry
            .path()
            .map_err(|e| Error::extract(format!("invalid entry path: {}", e)))?
            .into_owned();

        let relative = match strip_components(&path, strip)? {
            Some(relative) => relative,
            None => {
                summary.skipped += 1;
                continue;
            }
        };

        ensure_within(&root, &relative)?;

        let destination = root.join(&relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        match entry_type {
            EntryType::Symlink => {
                let link = link_name(&entry, &path)?;
                check_symlink_target(&relative, &link)?;
                unpack_entry(&mut entry, &destination)?;
            }
            EntryType::Link => {
                let link = link_name(&entry, &path)?;
                let source = strip_components(&link, strip)?
                    .ok_or_else(|| Error::unsafe_archive_entry(path.display().to_string()))?;
                ensure_within(&root, &source)?;
                hard_link(&root.join(source), &destination)?;
            }
            _ => unpack_entry(&mut entry, &destination)?,
        }

        if entry_type.is_dir() {
            summary.directories += 1;
        } else {
            summary.files += 1;
        }
    }

    debug!(
        "Extracted {} files and {} directories into {} ({} skipped)",
        summary.files, summary.directories, target, summary.skipped
    );

    Ok(summary)
}

fn unpack_entry<R: Read>(entry: &mut Entry<'_, R>, destination: &Path) -> Result<()> {
    entry
        .unpack(destination)
        .map(|_| ())
        .map_err(|e| Error::extract(format!("failed to write {}: {}", destination.display(), e)))
}

fn link_name<R: Read>(entry: &Entry<'_, R>, path: &Path) -> Result<PathBuf> {
    entry
        .link_name()
        .map_err(|e| Error::extract(format!("invalid link name for {}: {}", path.display(), e)))?
        .map(|link| link.into_owned())
        .ok_or_else(|| Error::extract(format!("link {} has no target", path.display())))
}

fn hard_link(source: &Path, destination: &Path) -> Result<()> {
    if fs::symlink_metadata(destination).is_ok() {
        fs::remove_file(destination)?;
    }
    fs::hard_link(source, destination).map_err(|e| {
        Error::extract(format!(
            "failed to link {} to {}: {}",
            destination.display(),
            source.display(),
            e
        ))
    })
}

/// Check that every existing prefix of `relative` under `root` stays in
/// `root` once symlinks are resolved
///
/// `root` must already be canonical.
fn ensure_within(root: &Path, relative: &Path) -> Result<()> {
    let mut current = root.to_path_buf();

    for component in relative.components() {
        current.push(component);
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let resolved = fs::canonicalize(&current)
                    .map_err(|_| Error::unsafe_archive_entry(relative.display().to_string()))?;
                if !resolved.starts_with(root) {
                    return Err(Error::unsafe_archive_entry(relative.display().to_string()));
                }
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Reject a symlink at `relative` whose target is absolute or climbs above
/// the extraction root
pub fn check_symlink_target(relative: &Path, link: &Path) -> Result<()> {
    let reject = || {
        Error::unsafe_archive_entry(format!("{} -> {}", relative.display(), link.display()))
    };
    let mut depth = relative
        .parent()
        .map(|parent| parent.components().count())
        .unwrap_or(0);

    for component in link.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(reject());
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(reject()),
        }
    }

    Ok(())
}

/// Remove `strip` leading components from an archive entry path
///
/// Returns `None` when nothing remains. Paths that are absolute or climb out
/// with `..` are rejected.
pub fn strip_components(path: &Path, strip: usize) -> Result<Option<PathBuf>> {
    let mut normal = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normal.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::unsafe_archive_entry(path.display().to_string()))
            }
        }
    }

    if normal.len() <= strip {
        return Ok(None);
    }

    Ok(Some(normal[strip..].iter().collect()))
}
