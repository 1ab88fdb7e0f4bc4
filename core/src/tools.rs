//! Tool descriptors for running scenarios.
//!
//! Each on-demand scenario is advertised as a callable tool named
//! `run_scenario_<id>` whose input schema is the remapped scenario interface.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{MappingError, ParameterSpec, RemapOptions, SchemaNode, remap_interface};

/// Scheduling type of scenarios that only run when triggered.
pub const ON_DEMAND: &str = "on-demand";

/// Prefix of the tool name generated for each runnable scenario.
pub const RUN_TOOL_PREFIX: &str = "run_scenario_";

static RUN_TOOL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^run_scenario_(\d+)$").expect("static regex must compile"));

/// Scheduling settings of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduling {
    /// `on-demand`, `indefinitely`, `immediately`, ...
    #[serde(rename = "type")]
    pub scheduling_type: String,
}

/// A scenario as listed by the scenarios endpoint.
///
/// # Examples
///
/// ```
/// use interface_schema_core::ScenarioSummary;
///
/// let scenario: ScenarioSummary = serde_json::from_str(
///     r#"{"id": 7, "name": "Sync", "scheduling": {"type": "on-demand"}, "isActive": true}"#,
/// ).unwrap();
/// assert!(scenario.is_on_demand());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Scenario id, as used in `run_scenario_<id>`.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Optional free-text description; empty counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the scenario runs.
    pub scheduling: Scheduling,
}

impl ScenarioSummary {
    /// Creates a summary with the given scheduling type.
    pub fn new(id: u64, name: impl Into<String>, scheduling_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            scheduling: Scheduling {
                scheduling_type: scheduling_type.into(),
            },
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `true` if the scenario only runs when triggered.
    pub fn is_on_demand(&self) -> bool {
        self.scheduling.scheduling_type == ON_DEMAND
    }
}

/// A callable operation: name, human description and accepted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Callable name, e.g. `run_scenario_42`.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Schema of the accepted arguments, serialized as `inputSchema`.
    pub input_schema: SchemaNode,
}

/// Returns the tool name for running scenario `id`.
///
/// # Examples
///
/// ```
/// assert_eq!(interface_schema_core::run_tool_name(42), "run_scenario_42");
/// ```
pub fn run_tool_name(id: u64) -> String {
    format!("{RUN_TOOL_PREFIX}{id}")
}

/// Extracts the scenario id from a `run_scenario_<id>` tool name.
///
/// # Examples
///
/// ```
/// use interface_schema_core::parse_run_tool_name;
///
/// assert_eq!(parse_run_tool_name("run_scenario_42"), Some(42));
/// assert_eq!(parse_run_tool_name("run_scenario_"), None);
/// assert_eq!(parse_run_tool_name("get_scenario"), None);
/// ```
pub fn parse_run_tool_name(name: &str) -> Option<u64> {
    RUN_TOOL_NAME
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}

/// Builds the run tool for one scenario from its interface fields.
///
/// The description is the scenario name, followed by the scenario
/// description in parentheses when one is set.
///
/// # Errors
///
/// Propagates [`MappingError`] from remapping the interface.
///
/// # Examples
///
/// ```
/// use interface_schema_core::*;
///
/// let scenario = ScenarioSummary::new(3, "Add to inventory", ON_DEMAND)
///     .with_description("Stores one item");
/// let fields = vec![ParameterSpec::text("item_name").required()];
///
/// let tool = scenario_tool(&scenario, &fields, &RemapOptions::default()).unwrap();
/// assert_eq!(tool.name, "run_scenario_3");
/// assert_eq!(tool.description, "Add to inventory (Stores one item)");
/// assert!(tool.input_schema.is_required("item_name"));
/// ```
pub fn scenario_tool(
    scenario: &ScenarioSummary,
    fields: &[ParameterSpec],
    options: &RemapOptions,
) -> Result<ToolDescriptor, MappingError> {
    let input_schema = remap_interface(fields, options)?;
    let description = match scenario.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("{} ({description})", scenario.name)
        }
        _ => scenario.name.clone(),
    };

    debug!(scenario_id = scenario.id, fields = fields.len(), "Built scenario tool");
    Ok(ToolDescriptor {
        name: run_tool_name(scenario.id),
        description,
        input_schema,
    })
}

/// Builds run tools for every on-demand scenario, keeping input order.
///
/// # Errors
///
/// Stops at the first scenario whose interface fails to remap.
pub fn scenario_tools<'a, I>(
    entries: I,
    options: &RemapOptions,
) -> Result<Vec<ToolDescriptor>, MappingError>
where
    I: IntoIterator<Item = (&'a ScenarioSummary, &'a [ParameterSpec])>,
{
    entries
        .into_iter()
        .filter(|(scenario, _)| {
            let keep = scenario.is_on_demand();
            if !keep {
                debug!(
                    scenario_id = scenario.id,
                    scheduling = %scenario.scheduling.scheduling_type,
                    "Skipping scenario that is not on-demand"
                );
            }
            keep
        })
        .map(|(scenario, fields)| scenario_tool(scenario, fields, options))
        .collect()
}
