//! Parameter interface to JSON-Schema remapping.
//!
//! [`remap`] walks a [`ParameterSpec`] tree and produces the matching
//! [`SchemaNode`] tree:
//!
//! | parameter kind           | schema type | extra keywords                     |
//! |--------------------------|-------------|------------------------------------|
//! | `text`, `json`, `date`   | `string`    |                                    |
//! | `number`                 | `number`    |                                    |
//! | `boolean`                | `boolean`   |                                    |
//! | `select`                 | `string`    | `enum` from the option values      |
//! | `array`                  | `array`     | `items` from the element node      |
//! | `collection`             | `object`    | `properties`, `required`           |
//!
//! `help` becomes `description` and `default` is copied whenever the field
//! declared one. Field names only ever appear as keys of the parent's
//! `properties`.
//!
//! # Example
//!
//! ```
//! use interface_schema_core::*;
//!
//! let root = ParameterSpec::wrapper(vec![
//!     ParameterSpec::array("matrix", ParameterSpec::anonymous(ParameterKind::Array {
//!         element: Some(Box::new(ParameterSpec::anonymous(ParameterKind::Text))),
//!     })),
//! ]);
//!
//! let schema = remap(&root).unwrap();
//! assert_eq!(
//!     serde_json::to_value(&schema).unwrap(),
//!     serde_json::json!({
//!         "type": "object",
//!         "properties": {
//!             "matrix": {"type": "array", "items": {"type": "array", "items": {"type": "string"}}}
//!         },
//!         "required": []
//!     })
//! );
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{MappingError, ROOT_PATH, element_path, field_path};
use crate::{ParameterKind, ParameterSpec, SchemaNode, SchemaType};

/// Default bound on nesting below the root.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for a remap call.
///
/// # Examples
///
/// ```
/// use interface_schema_core::{DEFAULT_MAX_DEPTH, RemapOptions};
///
/// let options = RemapOptions::default();
/// assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
/// assert!(!options.omit_empty_enum);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapOptions {
    /// Deepest nesting level allowed below the root (the root is level 0).
    pub max_depth: usize,
    /// Leave out `enum` for a `select` without options instead of emitting
    /// `enum: []`. Off by default.
    pub omit_empty_enum: bool,
}

impl Default for RemapOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            omit_empty_enum: false,
        }
    }
}

/// Remaps a parameter tree with default options.
///
/// The root is conventionally a [`wrapper`](ParameterSpec::wrapper)
/// collection; its own `help` and `default` are discarded.
///
/// # Errors
///
/// See [`remap_with`].
pub fn remap(root: &ParameterSpec) -> Result<SchemaNode, MappingError> {
    remap_with(root, &RemapOptions::default())
}

/// Remaps a parameter tree.
///
/// # Errors
///
/// - [`MappingError::MissingFieldName`] when a collection field has no name.
/// - [`MappingError::DuplicateField`] when a collection repeats a field name.
/// - [`MappingError::DepthExceeded`] when nesting passes
///   [`RemapOptions::max_depth`].
///
/// # Examples
///
/// ```
/// use interface_schema_core::*;
///
/// let root = ParameterSpec::wrapper(vec![
///     ParameterSpec::collection("outer", vec![
///         ParameterSpec::collection("inner", vec![ParameterSpec::text("leaf")]),
///     ]),
/// ]);
///
/// let shallow = RemapOptions { max_depth: 1, ..RemapOptions::default() };
/// let err = remap_with(&root, &shallow).unwrap_err();
/// assert_eq!(err.path(), "$.outer.inner");
///
/// assert!(remap_with(&root, &RemapOptions::default()).is_ok());
/// ```
pub fn remap_with(root: &ParameterSpec, options: &RemapOptions) -> Result<SchemaNode, MappingError> {
    let mut node = remap_node(root, ROOT_PATH, 0, options)?;
    node.description = None;
    node.default = None;
    Ok(node)
}

/// Remaps the top-level fields of an interface as if they were wrapped in a
/// root collection.
///
/// # Errors
///
/// See [`remap_with`].
///
/// # Examples
///
/// ```
/// use interface_schema_core::*;
///
/// let fields = vec![ParameterSpec::boolean("dry_run")];
/// let schema = remap_interface(&fields, &RemapOptions::default()).unwrap();
/// assert_eq!(schema.property("dry_run").unwrap().schema_type, SchemaType::Boolean);
/// ```
pub fn remap_interface(
    fields: &[ParameterSpec],
    options: &RemapOptions,
) -> Result<SchemaNode, MappingError> {
    let node = remap_fields(fields, ROOT_PATH, 0, options)?;
    debug!(
        fields = fields.len(),
        required = node.required.as_ref().map_or(0, Vec::len),
        "Remapped interface"
    );
    Ok(node)
}

/// Decodes a JSON parameter node and remaps it.
///
/// # Errors
///
/// Decoding errors ([`MappingError::UnknownType`],
/// [`MappingError::UnexpectedSpecShape`], [`MappingError::Malformed`]) and
/// every error of [`remap_with`].
///
/// # Examples
///
/// ```
/// use interface_schema_core::*;
/// use serde_json::json;
///
/// let schema = remap_value(
///     &json!({"name": "wrapper", "type": "collection", "spec": [
///         {"name": "when", "type": "date", "help": "Run date"}
///     ]}),
///     &RemapOptions::default(),
/// ).unwrap();
/// let when = schema.property("when").unwrap();
/// assert_eq!(when.schema_type, SchemaType::String);
/// assert_eq!(when.description.as_deref(), Some("Run date"));
///
/// let err = remap_value(&json!({"type": "colour"}), &RemapOptions::default()).unwrap_err();
/// assert!(matches!(err, MappingError::UnknownType { .. }));
/// ```
pub fn remap_value(value: &Value, options: &RemapOptions) -> Result<SchemaNode, MappingError> {
    let root = ParameterSpec::from_value(value.clone())?;
    remap_with(&root, options)
}

fn remap_node(
    spec: &ParameterSpec,
    path: &str,
    depth: usize,
    options: &RemapOptions,
) -> Result<SchemaNode, MappingError> {
    if depth > options.max_depth {
        return Err(MappingError::DepthExceeded {
            path: path.to_string(),
            max_depth: options.max_depth,
        });
    }

    let mut node = match &spec.kind {
        ParameterKind::Text | ParameterKind::Json | ParameterKind::Date => {
            SchemaNode::new(SchemaType::String)
        }
        ParameterKind::Number => SchemaNode::new(SchemaType::Number),
        ParameterKind::Boolean => SchemaNode::new(SchemaType::Boolean),
        ParameterKind::Select { options: choices } => {
            let mut node = SchemaNode::new(SchemaType::String);
            if !(choices.is_empty() && options.omit_empty_enum) {
                node.enum_values = Some(choices.iter().map(|c| c.value.clone()).collect());
            }
            node
        }
        ParameterKind::Array { element } => {
            let mut node = SchemaNode::new(SchemaType::Array);
            if let Some(element) = element {
                let items = remap_node(element, &element_path(path), depth + 1, options)?;
                node.items = Some(Box::new(items));
            }
            node
        }
        ParameterKind::Collection { fields } => remap_fields(fields, path, depth, options)?,
    };

    node.description = spec.help.clone();
    node.default = spec.default.clone();
    Ok(node)
}

fn remap_fields(
    fields: &[ParameterSpec],
    path: &str,
    depth: usize,
    options: &RemapOptions,
) -> Result<SchemaNode, MappingError> {
    let mut properties = IndexMap::with_capacity(fields.len());
    let mut required = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let child_path = field_path(path, field.name.as_deref(), index);
        let Some(name) = field.name.as_deref() else {
            return Err(MappingError::MissingFieldName { path: child_path });
        };
        if properties.contains_key(name) {
            return Err(MappingError::DuplicateField {
                path: path.to_string(),
                name: name.to_string(),
            });
        }

        let child = remap_node(field, &child_path, depth + 1, options)?;
        properties.insert(name.to_string(), child);
        if field.required {
            required.push(name.to_string());
        }
    }

    Ok(SchemaNode {
        properties: Some(properties),
        required: Some(required),
        ..SchemaNode::new(SchemaType::Object)
    })
}
