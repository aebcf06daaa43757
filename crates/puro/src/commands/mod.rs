//! Command implementations

pub mod create_project;
