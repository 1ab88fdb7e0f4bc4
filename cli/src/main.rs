use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use interface_schema_core::{
    ParameterSpec, RemapConfig, ScenarioSummary, decode_interface,
    normalize_remote_failure, remap_interface, remap_value, scenario_tools,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Output format for schema documents.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "interface-schema", version)]
#[command(about = "Offline scenario interface remapping and error normalization")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Remap an interface document (or a single parameter node) to a JSON Schema.
    Remap(RemapArgs),
    /// Render a captured failure response as a normalized error.
    Normalize(NormalizeArgs),
    /// Build the run tool descriptor for one scenario.
    Tool(ToolArgs),
}

#[derive(Debug, Args)]
struct RemapArgs {
    /// Interface file; reads stdin when omitted or `-`.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: CliOutputFormat,
    /// YAML remap configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum nesting depth, overriding the configuration file.
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// HTTP status of the failed response.
    #[arg(long, value_parser = clap::value_parser!(u16).range(400..=599))]
    status: u16,
    /// Content-Type header of the response.
    #[arg(long)]
    content_type: Option<String>,
    /// Response body file; reads stdin when omitted or `-`.
    #[arg(long)]
    body: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ToolArgs {
    /// Scenario summary JSON (`id`, `name`, `description`, `scheduling`).
    #[arg(long)]
    scenario: PathBuf,
    /// Interface document of the scenario.
    #[arg(long)]
    interface: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: CliOutputFormat,
    /// YAML remap configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Remap(args) => run_remap(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Tool(args) => run_tool(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// remap command
// ---------------------------------------------------------------------------

fn run_remap(args: RemapArgs) -> Result<(), String> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    config.validate().map_err(|err| err.to_string())?;
    let options = config.options();

    let raw = read_input(args.input.as_deref())?;
    let document: Value = serde_json::from_slice(&raw)
        .map_err(|err| format!("Failed to parse interface JSON: {err}"))?;

    let schema = if is_interface_document(&document) {
        let fields = decode_interface(document).map_err(|err| err.to_string())?;
        debug!(fields = fields.len(), "Remapping interface document");
        remap_interface(&fields, &options)
    } else {
        debug!("Remapping single parameter node");
        remap_value(&document, &options)
    }
    .map_err(|err| err.to_string())?;

    print_document(&schema, args.format)
}

/// A bare field list, `{"input": [...]}` or `{"interface": {...}}`.
fn is_interface_document(document: &Value) -> bool {
    match document {
        Value::Array(_) => true,
        Value::Object(map) => {
            !map.contains_key("type") && (map.contains_key("input") || map.contains_key("interface"))
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// normalize command
// ---------------------------------------------------------------------------

fn run_normalize(args: NormalizeArgs) -> Result<(), String> {
    let body = read_input(args.body.as_deref())?;
    let error = normalize_remote_failure(args.status, args.content_type.as_deref(), &body);
    println!("{}", error.render());
    Ok(())
}

// ---------------------------------------------------------------------------
// tool command
// ---------------------------------------------------------------------------

fn run_tool(args: ToolArgs) -> Result<(), String> {
    let options = load_config(args.config.as_deref())?.options();

    let scenario: ScenarioSummary = serde_json::from_str(&read_text(&args.scenario)?)
        .map_err(|err| format!("Failed to parse '{}': {err}", args.scenario.display()))?;
    let document: Value = serde_json::from_str(&read_text(&args.interface)?)
        .map_err(|err| format!("Failed to parse '{}': {err}", args.interface.display()))?;
    let fields: Vec<ParameterSpec> = decode_interface(document).map_err(|err| err.to_string())?;

    let tools = scenario_tools([(&scenario, fields.as_slice())], &options)
        .map_err(|err| err.to_string())?;
    match tools.as_slice() {
        [tool] => print_document(tool, args.format),
        _ => Err(format!(
            "Scenario {} is not on-demand (scheduling: {})",
            scenario.id, scenario.scheduling.scheduling_type
        )),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<RemapConfig, String> {
    match path {
        Some(path) => RemapConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(RemapConfig::default()),
    }
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}

/// Reads a file, or stdin when `path` is `None` or `-`.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>, String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
        }
        _ => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(buffer)
        }
    }
}

fn print_document<T: Serialize>(document: &T, format: CliOutputFormat) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(document)
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(document).map_err(|e| format!("YAML serialization failed: {e}"))?
        }
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
