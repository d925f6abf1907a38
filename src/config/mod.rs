//! Generator configuration
//!
//! Provides types and loading for the optional `param-fixer.toml` file that
//! tunes the generated header and provenance field names.

pub mod loader;
pub mod schema;

pub use loader::{default_config, load_config, ConfigError};
pub use schema::*;
