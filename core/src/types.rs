//! Parameter interface and schema type definitions.
//!
//! This module defines both sides of the remapping: [`ParameterSpec`], the
//! typed form of a scenario interface field, and [`SchemaNode`], the
//! JSON-Schema fragment produced for it. Both serialize with [`serde`];
//! [`ParameterSpec`] goes through the wire codec so that its `spec` field is
//! read according to the declared `type`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name conventionally given to the synthetic root that wraps the top-level
/// interface fields.
pub const ROOT_WRAPPER_NAME: &str = "wrapper";

/// The `type` values accepted by the parameter interface, in declaration order.
pub const KNOWN_TYPES: [&str; 8] = [
    "text",
    "number",
    "boolean",
    "date",
    "json",
    "collection",
    "array",
    "select",
];

/// One selectable value of a `select` parameter.
///
/// # Examples
///
/// ```
/// use interface_schema_core::SelectOption;
///
/// let option = SelectOption::new("eu1.make.com").with_label("Europe");
/// assert_eq!(option.value, "eu1.make.com");
/// assert_eq!(option.label.as_deref(), Some("Europe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value submitted when this option is chosen.
    pub value: String,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOption {
    /// Creates an option without a label.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    /// Adds a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The declared type of a parameter together with the nested data that type
/// carries.
///
/// On the wire the `type` string decides how `spec` is shaped; here each
/// container kind owns its nested data directly, so an array always has (at
/// most) one element node and a collection always has a field list.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    /// Free text.
    Text,
    /// Numeric value.
    Number,
    /// `true`/`false`.
    Boolean,
    /// Date or date-time, transported as a string.
    Date,
    /// JSON document, transported as a string.
    Json,
    /// One value out of a fixed option list.
    Select {
        /// Options in declaration order.
        options: Vec<SelectOption>,
    },
    /// Homogeneous list; `element` describes every item.
    Array {
        /// Element type, `None` when the interface leaves it open.
        element: Option<Box<ParameterSpec>>,
    },
    /// Object with named fields.
    Collection {
        /// Fields in declaration order.
        fields: Vec<ParameterSpec>,
    },
}

impl ParameterKind {
    /// Returns the wire name of this kind (the `type` field).
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::ParameterKind;
    ///
    /// assert_eq!(ParameterKind::Json.type_name(), "json");
    /// assert_eq!(ParameterKind::Collection { fields: vec![] }.type_name(), "collection");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Json => "json",
            Self::Select { .. } => "select",
            Self::Array { .. } => "array",
            Self::Collection { .. } => "collection",
        }
    }

    /// Returns `true` for kinds whose meaning depends on nested parameters.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array { .. } | Self::Collection { .. })
    }
}

/// One field of a scenario interface.
///
/// Use the constructors ([`text`](ParameterSpec::text),
/// [`collection`](ParameterSpec::collection), [`array`](ParameterSpec::array),
/// ...) and chain builder methods such as
/// [`with_help`](ParameterSpec::with_help) to assemble a tree by hand, or
/// deserialize one from the JSON the Make API returns.
///
/// # Examples
///
/// ```
/// use interface_schema_core::{ParameterKind, ParameterSpec};
///
/// let field = ParameterSpec::number("quantity")
///     .required()
///     .with_default(1)
///     .with_help("How many items to add");
/// assert_eq!(field.name.as_deref(), Some("quantity"));
/// assert!(field.required);
/// assert_eq!(field.kind, ParameterKind::Number);
///
/// let parsed: ParameterSpec = serde_json::from_str(
///     r#"{"name": "tags", "type": "array", "spec": {"type": "text"}}"#,
/// ).unwrap();
/// assert!(matches!(parsed.kind, ParameterKind::Array { element: Some(_) }));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "crate::codec::WireParameter")]
pub struct ParameterSpec {
    /// Field name; absent for the synthetic root and for array element nodes.
    pub name: Option<String>,
    /// Display label
    pub label: Option<String>,
    /// Free-text description shown to whoever fills the field.
    pub help: Option<String>,
    /// Whether the field must be supplied.
    pub required: bool,
    /// Default value. `Some(Value::Null)` is an explicit `null` default and
    /// differs from `None` (no default declared).
    pub default: Option<Value>,
    /// Multi-line hint for text fields
    pub multiline: Option<bool>,
    /// Declared type and nested data.
    pub kind: ParameterKind,
}

impl ParameterSpec {
    /// Creates a named parameter of the given kind.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::anonymous(kind)
        }
    }

    /// Creates an unnamed parameter, as used for array elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::{ParameterKind, ParameterSpec};
    ///
    /// let element = ParameterSpec::anonymous(ParameterKind::Text);
    /// assert!(element.name.is_none());
    /// ```
    pub fn anonymous(kind: ParameterKind) -> Self {
        Self {
            name: None,
            label: None,
            help: None,
            required: false,
            default: None,
            multiline: None,
            kind,
        }
    }

    /// Creates a `text` parameter.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Text)
    }

    /// Creates a `number` parameter.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Number)
    }

    /// Creates a `boolean` parameter.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Boolean)
    }

    /// Creates a `date` parameter.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Date)
    }

    /// Creates a `json` parameter.
    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Json)
    }

    /// Creates a `select` parameter with unlabeled options.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::{ParameterKind, ParameterSpec};
    ///
    /// let zone = ParameterSpec::select("zone", ["eu1", "us1"]);
    /// let ParameterKind::Select { options } = &zone.kind else { unreachable!() };
    /// assert_eq!(options.len(), 2);
    /// assert_eq!(options[1].value, "us1");
    /// ```
    pub fn select<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = values.into_iter().map(SelectOption::new).collect();
        Self::new(name, ParameterKind::Select { options })
    }

    /// Creates an `array` parameter whose items follow `element`.
    ///
    /// The element's own name, if any, is irrelevant to the schema.
    pub fn array(name: impl Into<String>, element: ParameterSpec) -> Self {
        Self::new(
            name,
            ParameterKind::Array {
                element: Some(Box::new(element)),
            },
        )
    }

    /// Creates a `collection` parameter with the given fields.
    pub fn collection(name: impl Into<String>, fields: Vec<ParameterSpec>) -> Self {
        Self::new(name, ParameterKind::Collection { fields })
    }

    /// Wraps top-level interface fields in the synthetic root collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::{ParameterSpec, ROOT_WRAPPER_NAME};
    ///
    /// let root = ParameterSpec::wrapper(vec![ParameterSpec::text("title")]);
    /// assert_eq!(root.name.as_deref(), Some(ROOT_WRAPPER_NAME));
    /// assert_eq!(root.fields().len(), 1);
    /// ```
    pub fn wrapper(fields: Vec<ParameterSpec>) -> Self {
        Self::collection(ROOT_WRAPPER_NAME, fields)
    }

    /// Adds help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the default value. Pass `serde_json::Value::Null` for an explicit
    /// `null` default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns the nested fields of a collection, or an empty slice for every
    /// other kind.
    pub fn fields(&self) -> &[ParameterSpec] {
        match &self.kind {
            ParameterKind::Collection { fields } => fields,
            _ => &[],
        }
    }

    /// Returns the element node of an array, if declared.
    pub fn element(&self) -> Option<&ParameterSpec> {
        match &self.kind {
            ParameterKind::Array { element } => element.as_deref(),
            _ => None,
        }
    }
}

/// JSON-Schema primitive type of a [`SchemaNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"boolean"`
    Boolean,
    /// `"array"`
    Array,
    /// `"object"`
    Object,
}

/// A JSON-Schema fragment describing one parameter.
///
/// Only the keywords the remapper emits are modelled. Absent keywords are
/// skipped during serialization; `properties` keeps insertion order so the
/// same interface always serializes to the same bytes.
///
/// # Examples
///
/// ```
/// use interface_schema_core::{SchemaNode, SchemaType};
///
/// let node = SchemaNode::array(SchemaNode::new(SchemaType::String));
/// assert_eq!(
///     serde_json::to_string(&node).unwrap(),
///     r#"{"type":"array","items":{"type":"string"}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Primitive type.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Child schemas keyed by field name (objects only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Names of required children (objects only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Element schema (arrays only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Allowed values (selects only).
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Help text of the source field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default copied from the source field, explicit `null` included.
    #[serde(
        default,
        deserialize_with = "crate::codec::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
}

impl SchemaNode {
    /// Creates a node with only its type set.
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: None,
            required: None,
            items: None,
            enum_values: None,
            description: None,
            default: None,
        }
    }

    /// Creates an object node with no properties and an empty `required` list.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::SchemaNode;
    ///
    /// let node = SchemaNode::object();
    /// assert_eq!(
    ///     serde_json::to_string(&node).unwrap(),
    ///     r#"{"type":"object","properties":{},"required":[]}"#
    /// );
    /// ```
    pub fn object() -> Self {
        Self {
            properties: Some(IndexMap::new()),
            required: Some(Vec::new()),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Creates an array node with the given item schema.
    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Looks up a direct child property by name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }

    /// Returns `true` if `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|n| n == name))
    }

    /// Converts the node into a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures, which cannot occur for nodes built by
    /// this crate.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
