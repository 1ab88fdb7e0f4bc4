use std::path::Path;

use interface_schema_core::{
    ErrorKind, MappingError, ParameterSpec, RemapOptions, ScenarioSummary, SchemaType,
    ToolArguments, decode_interface, normalize_remote_failure, parse_run_tool_name, remap,
    remap_interface, remap_value, scenario_tools,
};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()))
}

fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&fixture(name)).unwrap()
}

fn interface_fields() -> Vec<ParameterSpec> {
    decode_interface(fixture_json("interface.json")).unwrap()
}

// ---------------------------------------------------------------------------
// Remapping
// ---------------------------------------------------------------------------

#[test]
fn test_full_interface_matches_expected_schema() {
    let schema = remap_interface(&interface_fields(), &RemapOptions::default()).unwrap();

    assert_eq!(schema.to_value().unwrap(), fixture_json("expected_schema.json"));
    assert_eq!(schema.required, Some(vec!["number".to_string()]));
    assert_eq!(schema.properties.as_ref().unwrap().len(), 10);
}

#[test]
fn test_wrapper_and_bare_field_list_agree() {
    let fields = interface_fields();
    let wrapped = remap(&ParameterSpec::wrapper(fields.clone())).unwrap();
    let bare = remap_interface(&fields, &RemapOptions::default()).unwrap();
    assert_eq!(wrapped, bare);
}

#[test]
fn test_remap_value_on_raw_wrapper() {
    let input = fixture_json("interface.json")["interface"]["input"].clone();
    let root = json!({"name": "wrapper", "type": "collection", "spec": input});

    let schema = remap_value(&root, &RemapOptions::default()).unwrap();
    assert_eq!(schema.to_value().unwrap(), fixture_json("expected_schema.json"));
}

#[test]
fn test_property_order_follows_interface() {
    let schema = remap_interface(&interface_fields(), &RemapOptions::default()).unwrap();
    let keys: Vec<&str> = schema
        .properties
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(
        keys,
        [
            "text",
            "number",
            "boolean",
            "date",
            "json",
            "select",
            "primitive_array",
            "array_of_arrays",
            "collection",
            "array_of_collections",
        ]
    );
}

#[test]
fn test_serialized_schema_is_byte_stable() {
    let fields = interface_fields();
    let first = serde_json::to_string(&remap_interface(&fields, &RemapOptions::default()).unwrap())
        .unwrap();
    let second = serde_json::to_string(&remap_interface(&fields, &RemapOptions::default()).unwrap())
        .unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with(r#"{"type":"object","properties":{"text":{"type":"string"}"#));
}

#[test]
fn test_unknown_type_inside_interface() {
    let raw = json!([
        {"name": "ok", "type": "text"},
        {"name": "rows", "type": "array", "spec": [{"name": "when", "type": "timestamp"}]}
    ]);

    let err = decode_interface(raw).unwrap_err();
    assert_eq!(
        err,
        MappingError::UnknownType {
            path: "$.rows[].when".into(),
            type_name: "timestamp".into(),
        }
    );
}

#[test]
fn test_nameless_collection_field_fails_remap() {
    let raw = json!({"type": "collection", "spec": [{"type": "text"}]});
    let err = remap_value(&raw, &RemapOptions::default()).unwrap_err();
    assert_eq!(err, MappingError::MissingFieldName { path: "$[0]".into() });
}

#[test]
fn test_array_of_collections_schema_type() {
    let schema = remap_interface(&interface_fields(), &RemapOptions::default()).unwrap();
    let node = schema.property("array_of_collections").unwrap();
    assert_eq!(node.schema_type, SchemaType::Array);
    let items = node.items.as_ref().unwrap();
    assert_eq!(items.schema_type, SchemaType::Object);
    assert_eq!(items.property("number").unwrap().schema_type, SchemaType::Number);
}

// ---------------------------------------------------------------------------
// Error normalization
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_run_error() {
    let body = fixture("run-error.json");
    let err = normalize_remote_failure(400, Some("application/json"), body.as_bytes());

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.message(), "Validation failed for 1 parameter(s).");
    assert_eq!(
        err.sub_errors(),
        ["Missing value of required parameter 'number'.".to_string()]
    );
    assert_eq!(
        err.to_string(),
        "MakeError: Validation failed for 1 parameter(s).\n - Missing value of required parameter 'number'."
    );
}

#[test]
fn test_validation_errors_render_without_inspection() {
    let errors = [
        ToolArguments::new(None).required_id("scenarioId").unwrap_err(),
        normalize_remote_failure(404, Some("application/json"), br#"{"message": "Not found"}"#),
    ];
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();

    assert_eq!(
        rendered,
        [
            "ValidationError: scenarioId is required (field: scenarioId)",
            "MakeError: Not found",
        ]
    );
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

#[test]
fn test_tools_for_listed_scenarios() {
    let listing = fixture_json("scenarios.json");
    let scenarios: Vec<ScenarioSummary> =
        serde_json::from_value(listing["scenarios"].clone()).unwrap();
    let fields = interface_fields();
    let empty: Vec<ParameterSpec> = Vec::new();

    let entries = scenarios.iter().map(|scenario| {
        let fields = if scenario.id == 1 { &fields } else { &empty };
        (scenario, fields.as_slice())
    });
    let tools = scenario_tools(entries, &RemapOptions::default()).unwrap();

    let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_str()).collect();
    assert_eq!(names, ["run_scenario_1", "run_scenario_3"]);
    assert_eq!(
        tools[0].description,
        "Tool: Add to Inventory (Stores one item in the inventory sheet)"
    );
    assert_eq!(tools[1].description, "Echo");
    assert_eq!(
        tools[0].input_schema.to_value().unwrap(),
        fixture_json("expected_schema.json")
    );

    for tool in &tools {
        assert!(parse_run_tool_name(&tool.name).is_some());
    }
}
