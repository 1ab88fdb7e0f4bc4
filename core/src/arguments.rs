//! Precondition checks on tool-call arguments.
//!
//! Every failed check is a [`NormalizedError::LocalValidation`] naming the
//! argument, produced before any remote call is attempted.

use serde_json::{Map, Value};

use crate::{NormalizedError, ParameterSpec, decode_interface};

/// Read-only view over the JSON arguments of one tool call.
///
/// Missing arguments and non-object argument values behave like an empty
/// object.
///
/// # Examples
///
/// ```
/// use interface_schema_core::ToolArguments;
/// use serde_json::json;
///
/// let raw = json!({"scenarioId": 11652, "draft": true});
/// let args = ToolArguments::new(Some(&raw));
/// assert_eq!(args.required_id("scenarioId").unwrap(), 11652);
/// assert_eq!(args.optional_bool("draft"), Some(true));
///
/// let err = ToolArguments::new(None).required_id("scenarioId").unwrap_err();
/// assert_eq!(err.to_string(), "ValidationError: scenarioId is required (field: scenarioId)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ToolArguments<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ToolArguments<'a> {
    /// Wraps the raw `arguments` value of a tool call.
    pub fn new(arguments: Option<&'a Value>) -> Self {
        Self {
            map: arguments.and_then(Value::as_object),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(field))
    }

    /// Reads a positive integer id. Digit strings are accepted as well.
    ///
    /// # Errors
    ///
    /// `"<field> is required"` when the argument is missing, zero, or not an
    /// integer.
    pub fn required_id(&self, field: &str) -> Result<u64, NormalizedError> {
        self.optional_id(field).ok_or_else(|| required(field))
    }

    /// Like [`required_id`](Self::required_id), but `None` instead of an error.
    pub fn optional_id(&self, field: &str) -> Option<u64> {
        let id = match self.get(field)? {
            Value::Number(number) => number.as_u64()?,
            Value::String(text) => text.trim().parse().ok()?,
            _ => return None,
        };
        (id > 0).then_some(id)
    }

    /// Reads a non-empty string.
    ///
    /// # Errors
    ///
    /// `"<field> is required"` when the argument is missing, empty, or not a
    /// string.
    pub fn required_str(&self, field: &str) -> Result<&'a str, NormalizedError> {
        self.optional_str(field).ok_or_else(|| required(field))
    }

    /// Like [`required_str`](Self::required_str), but `None` instead of an error.
    pub fn optional_str(&self, field: &str) -> Option<&'a str> {
        self.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Reads a boolean; anything else is `None`.
    pub fn optional_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// Reads a JSON array.
    ///
    /// # Errors
    ///
    /// `"<field> array is required"` when the argument is missing or not an
    /// array.
    pub fn required_array(&self, field: &str) -> Result<&'a [Value], NormalizedError> {
        self.get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                NormalizedError::local_validation(format!("{field} array is required"), Some(field))
            })
    }

    /// Reads an array argument as interface field definitions.
    ///
    /// # Errors
    ///
    /// The error of [`required_array`](Self::required_array), or a validation
    /// error carrying the decoder message when a definition is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::ToolArguments;
    /// use serde_json::json;
    ///
    /// let raw = json!({"input": [{"name": "qty", "type": "number", "default": 1}]});
    /// let fields = ToolArguments::new(Some(&raw)).interface_fields("input").unwrap();
    /// assert_eq!(fields[0].name.as_deref(), Some("qty"));
    ///
    /// let raw = json!({"input": [{"name": "qty", "type": "integer"}]});
    /// let err = ToolArguments::new(Some(&raw)).interface_fields("input").unwrap_err();
    /// assert_eq!(err.field(), Some("input"));
    /// ```
    pub fn interface_fields(&self, field: &str) -> Result<Vec<ParameterSpec>, NormalizedError> {
        let items = self.required_array(field)?;
        decode_interface(Value::Array(items.to_vec()))
            .map_err(|err| NormalizedError::local_validation(err.to_string(), Some(field)))
    }
}

fn required(field: &str) -> NormalizedError {
    NormalizedError::local_validation(format!("{field} is required"), Some(field))
}
