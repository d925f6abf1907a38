//! Configuration loading for `param-fixer.toml`
//!
//! The file is only read when passed with `--config`; there is no directory
//! search.

use super::schema::FixerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Load configuration from a `param-fixer.toml` file.
///
/// With `None`, returns the default configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("build/param-fixer.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<FixerConfig, ConfigError> {
    match path {
        Some(p) => load_config_file(p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<FixerConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config: FixerConfig = toml::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no file is given.
pub fn default_config() -> FixerConfig {
    FixerConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("param-fixer.toml");
        File::create(&path)
            .expect("should create config file")
            .write_all(content.as_bytes())
            .expect("should write config content");
        path
    }

    #[test]
    fn test_load_config_none_is_default() {
        let config = load_config(None).expect("default config should load");
        assert_eq!(config, FixerConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(
            &temp,
            "[header]\nguard = \"_VENDOR_PARAM_H_\"\n\n\
             [provenance]\nuser_key = \"const.build.owner\"\n",
        );

        let config = load_config(Some(&path)).expect("config should load");
        assert_eq!(config.header.guard, "_VENDOR_PARAM_H_");
        assert_eq!(config.provenance.user_key, "const.build.owner");
        assert_eq!(config.provenance.date_key, "const.product.build.date");
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let missing = temp.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(&temp, "[header\nguard = ");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(&temp, "[header]\narray_name = \"not-an-ident\"\n");
        let err = load_config(Some(&path)).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("header.array_name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
