//! Uniform error values for local and remote failures.
//!
//! A [`NormalizedError`] is either a local precondition failure, detected
//! before any request is made, or a failure reported by the remote service.
//! Both render through `Display`:
//!
//! - `ValidationError: <message>` with ` (field: <field>)` when a field is named;
//! - `MakeError: <message>` followed by one `\n - <sub-error>` line per
//!   sub-error.
//!
//! Callers can report any failure by converting it to text, without first
//! checking which kind it is.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Which side of the boundary detected a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input failed a local precondition.
    LocalValidation,
    /// The remote service rejected or failed the request.
    Remote,
}

/// A failure in a form the caller can print.
///
/// # Examples
///
/// ```
/// use interface_schema_core::{ErrorKind, NormalizedError};
///
/// let err = NormalizedError::remote(
///     400,
///     "Validation failed for 1 parameter(s).",
///     vec!["Missing value of required parameter 'number'.".into()],
/// );
/// assert_eq!(err.kind(), ErrorKind::Remote);
/// assert_eq!(
///     err.to_string(),
///     "MakeError: Validation failed for 1 parameter(s).\n - Missing value of required parameter 'number'."
/// );
///
/// let err = NormalizedError::local_validation("Invalid input", None);
/// assert_eq!(err.to_string(), "ValidationError: Invalid input");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizedError {
    /// Local precondition failure.
    #[error("ValidationError: {}{}", .message, field_suffix(.field))]
    LocalValidation {
        /// What went wrong.
        message: String,
        /// The offending input, if one can be named.
        field: Option<String>,
    },

    /// Failure reported by the remote service.
    #[error("MakeError: {}{}", .message, sub_error_lines(.sub_errors))]
    Remote {
        /// HTTP status of the failed response.
        status: u16,
        /// Summary message.
        message: String,
        /// Finer-grained messages, in the order the service sent them.
        sub_errors: Vec<String>,
    },
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_deref()
        .map(|field| format!(" (field: {field})"))
        .unwrap_or_default()
}

fn sub_error_lines(sub_errors: &[String]) -> String {
    sub_errors.iter().map(|sub| format!("\n - {sub}")).collect()
}

impl NormalizedError {
    /// Creates a local validation error, optionally naming the offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_schema_core::NormalizedError;
    ///
    /// let err = NormalizedError::local_validation("Field is required", Some("scenarioId"));
    /// assert_eq!(err.field(), Some("scenarioId"));
    /// assert_eq!(err.to_string(), "ValidationError: Field is required (field: scenarioId)");
    /// ```
    pub fn local_validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::LocalValidation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    /// Creates a remote error from already-extracted parts.
    pub fn remote(status: u16, message: impl Into<String>, sub_errors: Vec<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
            sub_errors,
        }
    }

    /// Returns which side detected the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LocalValidation { .. } => ErrorKind::LocalValidation,
            Self::Remote { .. } => ErrorKind::Remote,
        }
    }

    /// Returns the summary message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::LocalValidation { message, .. } | Self::Remote { message, .. } => message,
        }
    }

    /// Returns the sub-errors; always empty for local validation errors.
    pub fn sub_errors(&self) -> &[String] {
        match self {
            Self::LocalValidation { .. } => &[],
            Self::Remote { sub_errors, .. } => sub_errors,
        }
    }

    /// Returns the offending field of a local validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::LocalValidation { field, .. } => field.as_deref(),
            Self::Remote { .. } => None,
        }
    }

    /// Returns the HTTP status of a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::LocalValidation { .. } => None,
            Self::Remote { status, .. } => Some(*status),
        }
    }

    /// Renders the error text, identical to its `Display` output.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Builds a [`NormalizedError`] from a failed HTTP response.
///
/// When `content_type` names a JSON media type the body is parsed and the
/// top-level `message` (falling back to `detail`, then `error`) becomes the
/// summary, with `suberrors` (or `subErrors`) supplying the sub-errors. Each
/// sub-error may be a string or an object with a `message` (or `detail`, then
/// `error`). Any body that cannot be read this way is used verbatim as the
/// message; an empty body yields `Request failed with status <status>.`. This
/// function never fails.
///
/// `status` must be a failure status (400 or above). Debug builds assert it.
///
/// # Examples
///
/// ```
/// use interface_schema_core::normalize_remote_failure;
///
/// let err = normalize_remote_failure(
///     400,
///     Some("application/json; charset=utf-8"),
///     br#"{"message": "Validation failed for 1 parameter(s).",
///          "suberrors": [{"message": "Missing value of required parameter 'number'."}]}"#,
/// );
/// assert_eq!(err.sub_errors().len(), 1);
///
/// let err = normalize_remote_failure(502, Some("text/html"), b"<h1>Bad Gateway</h1>");
/// assert_eq!(err.to_string(), "MakeError: <h1>Bad Gateway</h1>");
/// ```
pub fn normalize_remote_failure(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
) -> NormalizedError {
    debug_assert!(status >= 400, "not a failure status: {status}");
    if content_type.is_some_and(is_structured) {
        match serde_json::from_slice::<Value>(body) {
            Ok(payload) => {
                if let Some(message) = extract_message(&payload) {
                    return NormalizedError::remote(status, message, extract_sub_errors(&payload));
                }
                debug!(status, "Structured failure body has no message, using raw text");
            }
            Err(error) => {
                debug!(status, error = %error, "Failed to parse structured failure body, using raw text");
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let message = if text.trim().is_empty() {
        format!("Request failed with status {status}.")
    } else {
        text.into_owned()
    };
    NormalizedError::remote(status, message, Vec::new())
}

fn is_structured(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}

fn extract_message(payload: &Value) -> Option<String> {
    if let Some(message) = payload.as_str() {
        return non_empty(message);
    }
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str).and_then(non_empty))
}

fn extract_sub_errors(payload: &Value) -> Vec<String> {
    let Some(entries) = ["suberrors", "subErrors"]
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_array))
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some(text.clone()),
            Value::Object(_) => {
                let message = extract_message(entry);
                if message.is_none() {
                    debug!(entry = %entry, "Dropping sub-error without a message");
                }
                message
            }
            _ => None,
        })
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json");

    #[test]
    fn test_validation_failure_renders_sub_errors() {
        let body = br#"{
            "detail": "Scenario input is invalid.",
            "message": "Validation failed for 1 parameter(s).",
            "code": "IM005",
            "suberrors": [{"message": "Missing value of required parameter 'number'.", "code": "IM005"}]
        }"#;

        let err = normalize_remote_failure(400, JSON, body);
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Validation failed for 1 parameter(s).");
        assert_eq!(
            err.sub_errors(),
            ["Missing value of required parameter 'number'.".to_string()]
        );
        assert_eq!(
            err.render(),
            "MakeError: Validation failed for 1 parameter(s).\n - Missing value of required parameter 'number'."
        );
    }

    #[test]
    fn test_string_sub_errors_keep_order() {
        let body = br#"{"message": "Bad", "subErrors": ["first", "second"]}"#;
        let err = normalize_remote_failure(422, JSON, body);
        assert_eq!(err.render(), "MakeError: Bad\n - first\n - second");
    }

    #[test]
    fn test_sub_error_fallback_keys() {
        let body = br#"{
            "message": "Validation failed for 3 parameter(s).",
            "suberrors": [
                {"message": "first"},
                {"detail": "second", "code": "IM005"},
                {"error": "third"},
                {"code": "IM006"}
            ]
        }"#;
        let err = normalize_remote_failure(400, JSON, body);
        assert_eq!(err.sub_errors(), ["first", "second", "third"]);
        assert_eq!(
            err.render(),
            "MakeError: Validation failed for 3 parameter(s).\n - first\n - second\n - third"
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not a failure status: 200")]
    fn test_success_status_is_rejected() {
        normalize_remote_failure(200, JSON, br#"{"message": "ok"}"#);
    }

    #[test]
    fn test_message_fallback_keys() {
        let err = normalize_remote_failure(404, JSON, br#"{"detail": "Scenario not found."}"#);
        assert_eq!(err.message(), "Scenario not found.");

        let err = normalize_remote_failure(401, JSON, br#"{"error": "Invalid token."}"#);
        assert_eq!(err.message(), "Invalid token.");
    }

    #[test]
    fn test_non_json_body_is_used_verbatim() {
        let err = normalize_remote_failure(500, Some("text/plain"), b"Internal error");
        assert_eq!(err.render(), "MakeError: Internal error");
        assert!(err.sub_errors().is_empty());
    }

    #[test]
    fn test_unparsable_json_falls_back_to_raw_text() {
        let err = normalize_remote_failure(502, JSON, b"{not json");
        assert_eq!(err.message(), "{not json");
    }

    #[test]
    fn test_json_without_message_falls_back_to_raw_text() {
        let body = br#"{"code": "IM001"}"#;
        let err = normalize_remote_failure(400, JSON, body);
        assert_eq!(err.message(), r#"{"code": "IM001"}"#);
    }

    #[test]
    fn test_missing_content_type_is_not_parsed() {
        let err = normalize_remote_failure(400, None, br#"{"message": "x"}"#);
        assert_eq!(err.message(), r#"{"message": "x"}"#);
    }

    #[test]
    fn test_problem_json_is_structured() {
        let err = normalize_remote_failure(
            409,
            Some("Application/Problem+JSON"),
            br#"{"message": "Conflict"}"#,
        );
        assert_eq!(err.message(), "Conflict");
    }

    #[test]
    fn test_empty_body() {
        let err = normalize_remote_failure(503, JSON, b"  ");
        assert_eq!(err.render(), "MakeError: Request failed with status 503.");
    }

    #[test]
    fn test_validation_error_rendering() {
        let err = NormalizedError::local_validation("Field is required", Some("scenarioId"));
        assert_eq!(err.kind(), ErrorKind::LocalValidation);
        assert_eq!(err.message(), "Field is required");
        assert_eq!(err.field(), Some("scenarioId"));
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "ValidationError: Field is required (field: scenarioId)"
        );

        let err = NormalizedError::local_validation("Invalid input", None);
        assert_eq!(err.field(), None);
        assert!(err.sub_errors().is_empty());
        assert_eq!(err.to_string(), "ValidationError: Invalid input");
    }
}
