//! YAML configuration for remapping.
//!
//! # Example YAML
//!
//! ```yaml
//! max_depth: 32
//! omit_empty_enum: true
//! ```
//!
//! Both keys are optional; missing keys take their defaults.

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::remap::{DEFAULT_MAX_DEPTH, RemapOptions};

/// File-level remap settings.
///
/// # Examples
///
/// ```
/// use interface_schema_core::RemapConfig;
///
/// let config = RemapConfig::from_yaml_str("max_depth: 8\n").unwrap();
/// assert_eq!(config.max_depth, 8);
/// assert!(!config.omit_empty_enum);
///
/// let options = config.options();
/// assert_eq!(options.max_depth, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemapConfig {
    /// Deepest nesting level allowed below the root.
    pub max_depth: usize,
    /// Leave out `enum` for selects without options. Off by default.
    pub omit_empty_enum: bool,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            omit_empty_enum: false,
        }
    }
}

impl RemapConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// [`YamlError`](ConfigError::YamlError) if parsing fails, and
    /// [`Invalid`](ConfigError::Invalid) if a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus I/O.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] when `max_depth` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the runtime options described by this config.
    pub fn options(&self) -> RemapOptions {
        RemapOptions {
            max_depth: self.max_depth,
            omit_empty_enum: self.omit_empty_enum,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth: 12\nomit_empty_enum: true").unwrap();

        let config = RemapConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            RemapConfig {
                max_depth: 12,
                omit_empty_enum: true,
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let err = RemapConfig::load("/nonexistent/remap.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RemapConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, RemapConfig::default());
        assert_eq!(config.options(), RemapOptions::default());
        assert!(!config.omit_empty_enum);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let err = RemapConfig::from_yaml_str("max_depth: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = RemapConfig::from_yaml_str("max_dept: 3").unwrap_err();
        assert!(matches!(err, ConfigError::YamlError(_)));
    }
}
