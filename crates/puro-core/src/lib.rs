//! # puro-core
//!
//! Core library for the Puro CLI providing:
//! - Runtime configuration types with documented defaults
//! - Hierarchical configuration loading (embedded, ~/.puro, PURO_* env)
//! - Shared error type and home directory helpers

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::RuntimeConfig;
pub use utils::{get_home_dir, get_puro_dir, PURO_DIR_NAME};
