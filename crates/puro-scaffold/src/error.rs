//! Error types for puro-scaffold

use thiserror::Error;

/// Result type alias using puro-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Target directory does not exist
    #[error("Target directory does not exist: {path}")]
    TargetNotFound { path: String },

    /// Target path exists but is not a directory
    #[error("Target path is not a directory: {path}")]
    TargetNotDirectory { path: String },

    /// Path cannot be represented as UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Archive download failed
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// Archive source answered with a non-success status
    #[error("Failed to download {url}: server responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Archive could not be extracted
    #[error("Failed to extract template: {message}")]
    Extract { message: String },

    /// Archive entry would land outside the target directory
    #[error("Refusing to extract unsafe archive entry: {path}")]
    UnsafeArchiveEntry { path: String },

    /// Package manager executable could not be located
    #[error("Package manager not found: {program}. Please ensure it is installed and in PATH")]
    PackageManagerNotFound { program: String },

    /// Package manager process could not be run
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// Package manager exited unsuccessfully
    #[error("Dependency installation with {program} failed: {status}")]
    InstallFailed { program: String, status: String },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] puro_core::Error),
}

impl Error {
    /// Create a target not found error
    pub fn target_not_found(path: impl Into<String>) -> Self {
        Self::TargetNotFound { path: path.into() }
    }

    /// Create a target not directory error
    pub fn target_not_directory(path: impl Into<String>) -> Self {
        Self::TargetNotDirectory { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an extraction error
    pub fn extract(message: impl Into<String>) -> Self {
        Self::Extract {
            message: message.into(),
        }
    }

    /// Create an unsafe archive entry error
    pub fn unsafe_archive_entry(path: impl Into<String>) -> Self {
        Self::UnsafeArchiveEntry { path: path.into() }
    }

    /// Create a package manager not found error
    pub fn package_manager_not_found(program: impl Into<String>) -> Self {
        Self::PackageManagerNotFound {
            program: program.into(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }

    /// Create an install failed error
    pub fn install_failed(program: impl Into<String>, status: impl Into<String>) -> Self {
        Self::InstallFailed {
            program: program.into(),
            status: status.into(),
        }
    }

    /// Whether this error is a precondition failure (missing directory or
    /// missing tool) rather than an I/O failure mid-pipeline
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::TargetNotFound { .. }
                | Self::TargetNotDirectory { .. }
                | Self::PackageManagerNotFound { .. }
        )
    }
}
