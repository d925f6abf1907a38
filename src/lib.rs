//! param-fixer - Library for generating parameter lookup headers
//!
//! This library provides functionality to:
//! - Parse `name=value` parameter config files
//! - Merge parameter sources with first-file-wins and override-wins rules
//! - Emit a C header with a static `{name, value}` table plus build provenance
//! - Write a depfile for incremental build systems

pub mod cli;
pub mod config;
pub mod depfile;
pub mod file_args;
pub mod fixer;
pub mod header;
pub mod params;
pub mod provenance;
