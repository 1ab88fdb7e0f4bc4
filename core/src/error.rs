//! Error types for interface decoding, remapping and configuration.

use thiserror::Error;

/// Errors raised while decoding or remapping a parameter interface.
///
/// Every variant carries the path of the offending node, written as `$` for
/// the root followed by `.name` for collection fields, `[index]` for unnamed
/// fields and `[]` for array elements (e.g. `$.orders[].sku`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// `type` is not one of the known parameter types.
    #[error("unrecognized parameter type '{type_name}' at {path}")]
    UnknownType {
        /// Node path.
        path: String,
        /// The rejected type string.
        type_name: String,
    },

    /// A collection field has no `name`, so it cannot become a property.
    #[error("collection field at {path} has no name")]
    MissingFieldName {
        /// Node path.
        path: String,
    },

    /// Two fields of one collection share a name.
    #[error("duplicate field '{name}' in collection at {path}")]
    DuplicateField {
        /// Path of the collection.
        path: String,
        /// The repeated field name.
        name: String,
    },

    /// `spec` has a shape the declared `type` does not allow.
    #[error("unexpected spec shape at {path}: expected {expected}")]
    UnexpectedSpecShape {
        /// Node path.
        path: String,
        /// What the declared type requires.
        expected: &'static str,
    },

    /// The node is not a valid parameter object (missing `type`, wrong field
    /// types, ...).
    #[error("malformed parameter at {path}: {reason}")]
    Malformed {
        /// Node path.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// Nesting goes deeper than the configured limit.
    #[error("nesting at {path} exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// Path of the first node past the limit.
        path: String,
        /// The limit in effect.
        max_depth: usize,
    },
}

impl MappingError {
    /// Returns the path of the node that caused the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::MappingError;
    ///
    /// let err = MappingError::MissingFieldName { path: "$[2]".into() };
    /// assert_eq!(err.path(), "$[2]");
    /// ```
    pub fn path(&self) -> &str {
        match self {
            Self::UnknownType { path, .. }
            | Self::MissingFieldName { path }
            | Self::DuplicateField { path, .. }
            | Self::UnexpectedSpecShape { path, .. }
            | Self::Malformed { path, .. }
            | Self::DepthExceeded { path, .. } => path,
        }
    }
}

/// Errors that can occur while loading a [`RemapConfig`](crate::RemapConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A value is outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub(crate) const ROOT_PATH: &str = "$";

pub(crate) fn field_path(parent: &str, name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) => format!("{parent}.{name}"),
        None => format!("{parent}[{index}]"),
    }
}

pub(crate) fn element_path(parent: &str) -> String {
    format!("{parent}[]")
}
