//! Common test infrastructure for puro-scaffold tests
//!
//! # Modules
//!
//! - `fixtures`: in-memory template archives and fake package managers
//! - `mock_server`: wiremock and raw TCP servers for download tests

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mock_server;

pub use fixtures::*;
pub use mock_server::*;

use camino::Utf8PathBuf;
use tempfile::TempDir;

/// UTF-8 path of a temporary directory
pub fn utf8_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("Invalid UTF-8 path")
}
