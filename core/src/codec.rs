//! Wire codec for parameter interfaces.
//!
//! The Make API encodes nesting in a single `spec` field whose shape depends
//! on the node's `type`: a list of fields for `collection`, a single element
//! node for `array`. Decoding reads `spec` according to the declared type and
//! produces a [`ParameterKind`] that owns its nested data directly. A
//! list-shaped `spec` on an `array` is how the API writes "array of
//! collections"; it decodes to an array whose element is an unnamed
//! collection.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{MappingError, ROOT_PATH, element_path, field_path};
use crate::{ParameterKind, ParameterSpec, SelectOption};

/// Nesting ceiling for decoding; remapping applies its own, configurable limit.
const DECODE_DEPTH_LIMIT: usize = 256;

/// Parameter node exactly as it appears on the wire.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct WireParameter {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_present")]
    default: Option<Value>,
    #[serde(default)]
    multiline: Option<bool>,
    #[serde(default)]
    options: Option<Vec<SelectOption>>,
    #[serde(default)]
    spec: Option<Value>,
}

impl TryFrom<WireParameter> for ParameterSpec {
    type Error = MappingError;

    fn try_from(wire: WireParameter) -> Result<Self, Self::Error> {
        wire.into_spec(ROOT_PATH, 0)
    }
}

impl WireParameter {
    fn into_spec(self, path: &str, depth: usize) -> Result<ParameterSpec, MappingError> {
        if depth > DECODE_DEPTH_LIMIT {
            return Err(MappingError::DepthExceeded {
                path: path.to_string(),
                max_depth: DECODE_DEPTH_LIMIT,
            });
        }

        let kind = match self.type_name.as_str() {
            "text" => ParameterKind::Text,
            "number" => ParameterKind::Number,
            "boolean" => ParameterKind::Boolean,
            "date" => ParameterKind::Date,
            "json" => ParameterKind::Json,
            "select" => ParameterKind::Select {
                options: self.options.unwrap_or_default(),
            },
            "array" => ParameterKind::Array {
                element: decode_element(self.spec, path, depth)?.map(Box::new),
            },
            "collection" => ParameterKind::Collection {
                fields: decode_fields(self.spec, path, depth)?,
            },
            other => {
                return Err(MappingError::UnknownType {
                    path: path.to_string(),
                    type_name: other.to_string(),
                });
            }
        };

        Ok(ParameterSpec {
            name: self.name,
            label: self.label,
            help: self.help,
            required: self.required.unwrap_or(false),
            default: self.default,
            multiline: self.multiline,
            kind,
        })
    }
}

fn decode_node(value: Value, path: &str, depth: usize) -> Result<ParameterSpec, MappingError> {
    let wire: WireParameter =
        serde_json::from_value(value).map_err(|source| MappingError::Malformed {
            path: path.to_string(),
            reason: source.to_string(),
        })?;
    wire.into_spec(path, depth)
}

fn decode_list(
    items: Vec<Value>,
    path: &str,
    depth: usize,
) -> Result<Vec<ParameterSpec>, MappingError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let name = item.get("name").and_then(Value::as_str);
            let child = field_path(path, name, index);
            decode_node(item, &child, depth + 1)
        })
        .collect()
}

fn decode_fields(
    spec: Option<Value>,
    path: &str,
    depth: usize,
) -> Result<Vec<ParameterSpec>, MappingError> {
    match spec {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => decode_list(items, path, depth),
        Some(_) => Err(MappingError::UnexpectedSpecShape {
            path: path.to_string(),
            expected: "a list of fields",
        }),
    }
}

fn decode_element(
    spec: Option<Value>,
    path: &str,
    depth: usize,
) -> Result<Option<ParameterSpec>, MappingError> {
    let element = element_path(path);
    match spec {
        None | Some(Value::Null) => Ok(None),
        Some(node @ Value::Object(_)) => decode_node(node, &element, depth + 1).map(Some),
        Some(Value::Array(items)) => {
            let fields = decode_list(items, &element, depth + 1)?;
            Ok(Some(ParameterSpec::anonymous(ParameterKind::Collection {
                fields,
            })))
        }
        Some(_) => Err(MappingError::UnexpectedSpecShape {
            path: path.to_string(),
            expected: "an element node or a list of fields",
        }),
    }
}

impl Serialize for ParameterSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry("type", self.kind.type_name())?;
        if let Some(label) = &self.label {
            map.serialize_entry("label", label)?;
        }
        if let Some(help) = &self.help {
            map.serialize_entry("help", help)?;
        }
        if self.required {
            map.serialize_entry("required", &true)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(multiline) = self.multiline {
            map.serialize_entry("multiline", &multiline)?;
        }
        match &self.kind {
            ParameterKind::Select { options } => map.serialize_entry("options", options)?,
            ParameterKind::Array {
                element: Some(element),
            } => map.serialize_entry("spec", element)?,
            ParameterKind::Collection { fields } => map.serialize_entry("spec", fields)?,
            _ => {}
        }
        map.end()
    }
}

impl ParameterSpec {
    /// Decodes a single parameter node from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownType`] for a `type` outside the known
    /// set, [`MappingError::UnexpectedSpecShape`] when `spec` does not fit the
    /// declared type, and [`MappingError::Malformed`] when the node is not a
    /// parameter object at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::{MappingError, ParameterSpec};
    /// use serde_json::json;
    ///
    /// let spec = ParameterSpec::from_value(json!({"name": "n", "type": "number"})).unwrap();
    /// assert_eq!(spec.name.as_deref(), Some("n"));
    ///
    /// let err = ParameterSpec::from_value(json!({"name": "n", "type": "color"})).unwrap_err();
    /// assert!(matches!(err, MappingError::UnknownType { .. }));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, MappingError> {
        decode_node(value, ROOT_PATH, 0)
    }

    /// Encodes this node back into its wire form.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Decodes the top-level fields of a scenario interface.
///
/// Accepts a bare list of fields, an interface object (`{"input": [...]}`),
/// or the API's envelope around it (`{"interface": {"input": [...]}}`).
///
/// # Errors
///
/// Returns the first [`MappingError`] found in any field, or
/// [`MappingError::UnexpectedSpecShape`] when no field list can be located.
///
/// # Examples
///
/// ```
/// use interface_schema_core::decode_interface;
/// use serde_json::json;
///
/// let fields = decode_interface(json!({
///     "interface": {"input": [{"name": "title", "type": "text"}], "output": null}
/// })).unwrap();
/// assert_eq!(fields.len(), 1);
/// ```
pub fn decode_interface(value: Value) -> Result<Vec<ParameterSpec>, MappingError> {
    match value {
        Value::Array(items) => decode_list(items, ROOT_PATH, 0),
        Value::Object(mut object) => {
            if let Some(Value::Object(inner)) = object.remove("interface") {
                return decode_interface(Value::Object(inner));
            }
            match object.remove("input") {
                Some(Value::Array(items)) => decode_list(items, ROOT_PATH, 0),
                Some(Value::Null) => Ok(Vec::new()),
                _ => Err(MappingError::UnexpectedSpecShape {
                    path: ROOT_PATH.to_string(),
                    expected: "a list of fields or an object with an `input` list",
                }),
            }
        }
        _ => Err(MappingError::UnexpectedSpecShape {
            path: ROOT_PATH.to_string(),
            expected: "a list of fields or an object with an `input` list",
        }),
    }
}

/// Deserializes a field that may hold an explicit `null`.
///
/// Paired with `#[serde(default)]`: an absent key stays `None`, while a
/// present key (including `null`) becomes `Some(value)`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_scalar_fields() {
        let spec = ParameterSpec::from_value(json!({
            "name": "note",
            "type": "text",
            "label": "Note",
            "help": "Free text",
            "multiline": true
        }))
        .unwrap();

        assert_eq!(spec.kind, ParameterKind::Text);
        assert_eq!(spec.label.as_deref(), Some("Note"));
        assert_eq!(spec.help.as_deref(), Some("Free text"));
        assert_eq!(spec.multiline, Some(true));
        assert!(!spec.required);
        assert!(spec.default.is_none());
    }

    #[test]
    fn test_decode_distinguishes_null_default_from_absent() {
        let with_null =
            ParameterSpec::from_value(json!({"name": "a", "type": "text", "default": null}))
                .unwrap();
        assert_eq!(with_null.default, Some(Value::Null));

        let without = ParameterSpec::from_value(json!({"name": "a", "type": "text"})).unwrap();
        assert_eq!(without.default, None);
    }

    #[test]
    fn test_decode_array_with_list_spec_as_collection_element() {
        let spec = ParameterSpec::from_value(json!({
            "name": "rows",
            "type": "array",
            "spec": [{"name": "number", "type": "number"}]
        }))
        .unwrap();

        let element = spec.element().expect("array element");
        assert!(element.name.is_none());
        assert_eq!(element.fields().len(), 1);
        assert_eq!(element.fields()[0].kind, ParameterKind::Number);
    }

    #[test]
    fn test_decode_collection_rejects_single_node_spec() {
        let err = ParameterSpec::from_value(json!({
            "name": "group",
            "type": "collection",
            "spec": {"type": "text"}
        }))
        .unwrap_err();

        assert_eq!(
            err,
            MappingError::UnexpectedSpecShape {
                path: "$".into(),
                expected: "a list of fields",
            }
        );
    }

    #[test]
    fn test_decode_unknown_type_reports_nested_path() {
        let err = ParameterSpec::from_value(json!({
            "type": "collection",
            "spec": [
                {"name": "ok", "type": "text"},
                {"name": "orders", "type": "array", "spec": {"type": "money"}}
            ]
        }))
        .unwrap_err();

        assert_eq!(
            err,
            MappingError::UnknownType {
                path: "$.orders[]".into(),
                type_name: "money".into(),
            }
        );
    }

    #[test]
    fn test_decode_missing_type_is_malformed() {
        let err = ParameterSpec::from_value(json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, MappingError::Malformed { ref path, .. } if path == "$"));
    }

    #[test]
    fn test_serialize_uses_wire_shape() {
        let spec = ParameterSpec::collection(
            "group",
            vec![
                ParameterSpec::array("tags", ParameterSpec::anonymous(ParameterKind::Text)),
                ParameterSpec::select("zone", ["eu1"]),
            ],
        );

        assert_eq!(
            spec.to_value().unwrap(),
            json!({
                "name": "group",
                "type": "collection",
                "spec": [
                    {"name": "tags", "type": "array", "spec": {"type": "text"}},
                    {"name": "zone", "type": "select", "options": [{"value": "eu1"}]}
                ]
            })
        );
    }

    #[test]
    fn test_reencoded_list_element_decodes_to_same_tree() {
        let original = ParameterSpec::from_value(json!({
            "name": "rows",
            "type": "array",
            "spec": [{"name": "qty", "type": "number", "required": true, "default": 0}]
        }))
        .unwrap();

        let decoded = ParameterSpec::from_value(original.to_value().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_interface_rejects_scalar() {
        let err = decode_interface(json!("text")).unwrap_err();
        assert!(matches!(err, MappingError::UnexpectedSpecShape { .. }));
    }

    #[test]
    fn test_decode_interface_null_input_is_empty() {
        let fields = decode_interface(json!({"input": null, "output": null})).unwrap();
        assert!(fields.is_empty());
    }
}
