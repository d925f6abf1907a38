//! Configuration schema types for `param-fixer.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard `_PARAMETER_CFG_H_` / `g_paramDefCfgNodes` header.

use serde::Deserialize;

/// Default include guard for the generated header.
pub const DEFAULT_GUARD: &str = "_PARAMETER_CFG_H_";

/// Default name of the static lookup array.
pub const DEFAULT_ARRAY_NAME: &str = "g_paramDefCfgNodes";

/// Default key for the build timestamp entry.
pub const DEFAULT_DATE_KEY: &str = "const.product.build.date";

/// Default key for the build user entry.
pub const DEFAULT_USER_KEY: &str = "const.product.build.user";

/// Generated header layout
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Include guard macro
    pub guard: String,
    /// Name of the `static Node ...[]` array
    pub array_name: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { guard: DEFAULT_GUARD.to_string(), array_name: DEFAULT_ARRAY_NAME.to_string() }
    }
}

/// Names of the injected build-provenance entries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProvenanceConfig {
    /// Key receiving the build timestamp (milliseconds since the Unix epoch)
    pub date_key: String,
    /// Key receiving the invoking user name
    pub user_key: String,
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self { date_key: DEFAULT_DATE_KEY.to_string(), user_key: DEFAULT_USER_KEY.to_string() }
    }
}

/// Complete `param-fixer.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixerConfig {
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub provenance: ProvenanceConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "header.guard")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "param-fixer.toml: '{}' {}", self.field, self.message)
    }
}

/// Check whether `s` is usable as a C identifier.
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FixerConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !is_c_identifier(&self.header.guard) {
            errors.push(ConfigValidationError {
                field: "header.guard".to_string(),
                message: "must be a valid C identifier".to_string(),
            });
        }

        if !is_c_identifier(&self.header.array_name) {
            errors.push(ConfigValidationError {
                field: "header.array_name".to_string(),
                message: "must be a valid C identifier".to_string(),
            });
        }

        if self.provenance.date_key.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "provenance.date_key".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.provenance.user_key.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "provenance.user_key".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.provenance.date_key == self.provenance.user_key {
            errors.push(ConfigValidationError {
                field: "provenance.user_key".to_string(),
                message: "must differ from provenance.date_key".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FixerConfig = toml::from_str("").unwrap();
        assert_eq!(config, FixerConfig::default());
        assert_eq!(config.header.guard, "_PARAMETER_CFG_H_");
        assert_eq!(config.header.array_name, "g_paramDefCfgNodes");
        assert_eq!(config.provenance.date_key, "const.product.build.date");
        assert_eq!(config.provenance.user_key, "const.product.build.user");
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_config_parse() {
        let toml = r#"
            [header]
            array_name = "g_vendorParams"
        "#;
        let config: FixerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.header.array_name, "g_vendorParams");
        assert_eq!(config.header.guard, DEFAULT_GUARD);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<FixerConfig, _> = toml::from_str("[output]\npath = \"x.h\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_c_identifier() {
        assert!(is_c_identifier("_PARAMETER_CFG_H_"));
        assert!(is_c_identifier("g_nodes2"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("2nodes"));
        assert!(!is_c_identifier("bad-name"));
        assert!(!is_c_identifier("has space"));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = FixerConfig {
            header: HeaderConfig { guard: "bad guard".into(), array_name: "9nodes".into() },
            provenance: ProvenanceConfig { date_key: "same".into(), user_key: "same".into() },
        };
        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["header.guard", "header.array_name", "provenance.user_key"]);
        assert!(errors[0].to_string().contains("'header.guard'"));
    }

    #[test]
    fn test_empty_provenance_key_rejected() {
        let mut config = FixerConfig::default();
        config.provenance.date_key = "  ".into();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "provenance.date_key");
    }
}
