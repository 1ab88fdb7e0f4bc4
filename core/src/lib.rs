//! Scenario interface remapping and remote error normalization.
//!
//! This crate turns the parameter interface a Make scenario declares into a
//! JSON-Schema fragment, and turns failures into one printable error type:
//!
//! - [`ParameterSpec`]: one field of a scenario interface (name, kind,
//!   help text, default, nested fields).
//! - [`SchemaNode`]: the JSON-Schema-compatible node produced for a field.
//! - [`remap`] / [`remap_interface`]: the recursive converter between the two.
//! - [`NormalizedError`]: local precondition failures and remote API
//!   failures behind one rendering contract.
//! - [`normalize_remote_failure`]: builds a [`NormalizedError`] from a raw
//!   HTTP failure (status, content type, body).
//!
//! Tool helpers ([`scenario_tool`], [`parse_run_tool_name`]) and argument
//! checks ([`ToolArguments`]) are thin pure wrappers used by whatever layer
//! exposes scenarios as callable tools.
//!
//! # Example
//!
//! ```
//! use interface_schema_core::*;
//!
//! let fields = vec![
//!     ParameterSpec::text("title").with_help("Ticket title"),
//!     ParameterSpec::number("priority").required().with_default(3),
//!     ParameterSpec::select("queue", ["support", "billing"]),
//! ];
//!
//! let schema = remap_interface(&fields, &RemapOptions::default()).unwrap();
//! assert_eq!(schema.schema_type, SchemaType::Object);
//! assert_eq!(schema.required.as_deref(), Some(&["priority".to_string()][..]));
//!
//! let error = NormalizedError::local_validation("scenarioId is required", Some("scenarioId"));
//! assert_eq!(
//!     error.to_string(),
//!     "ValidationError: scenarioId is required (field: scenarioId)"
//! );
//! ```

mod arguments;
mod codec;
mod config;
mod error;
mod normalize;
mod remap;
mod tools;
mod types;

pub use arguments::ToolArguments;
pub use codec::decode_interface;
pub use config::RemapConfig;
pub use error::{ConfigError, MappingError};
pub use normalize::{ErrorKind, NormalizedError, normalize_remote_failure};
pub use remap::{DEFAULT_MAX_DEPTH, RemapOptions, remap, remap_interface, remap_value, remap_with};
pub use tools::{
    ON_DEMAND, RUN_TOOL_PREFIX, ScenarioSummary, Scheduling, ToolDescriptor, parse_run_tool_name,
    run_tool_name, scenario_tool, scenario_tools,
};
pub use types::*;
