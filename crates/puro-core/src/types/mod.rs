//! Type definitions for Puro configuration

mod runtime_config;

pub use runtime_config::*;
