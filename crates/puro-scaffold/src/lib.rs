//! # puro-scaffold
//!
//! Project scaffolding for the Puro CLI:
//! - Template archive URL construction
//! - Archive download into the project's `.puro` directory
//! - Strip-one extraction of `.tar.gz` templates
//! - Dependency installation through an external package manager
//!
//! # Example
//!
//! ```no_run
//! use puro_scaffold::{CreateProjectCommand, CreateProjectOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = CreateProjectOptions::default()
//!     .with_template(Some("puro-framework/puro-skeleton".to_string()));
//! let command = CreateProjectCommand::new(options)?;
//! let report = command.run("/tmp/my-app").await?;
//! println!("Extracted {} entries", report.extracted.written());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod context;
pub mod download;
pub mod error;
pub mod extract;
pub mod install;
pub mod options;
pub mod template_url;

pub use command::{CreateProjectCommand, CreateProjectReport};
pub use context::ProjectContext;
pub use download::ArchiveDownloader;
pub use error::{Error, Result};
pub use extract::{extract_archive, ExtractSummary};
pub use install::{DependencyInstaller, InstallReport};
pub use options::CreateProjectOptions;
pub use template_url::build_archive_url;
