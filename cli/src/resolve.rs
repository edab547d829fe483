#![deny(missing_docs)]

//! # Resolve Command
//!
//! Runs the core pass and dumps the type registry, the operation descriptors
//! and their tag groups as JSON or YAML for an external emitter.

use crate::config::{IsoStringConfig, SourceArgs, TypegenConfig};
use crate::error::{CliError, CliResult};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use typegen_core::{Document, OperationDescriptor, ParsedApi, SchemaParser, TypeRegistry};

/// Serialization format of the dump.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the resolve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Document source flags.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output file (stdout when absent and not set in the config).
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// What the emitter receives.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dump<'a> {
    types: &'a TypeRegistry,
    apis: &'a [OperationDescriptor],
    groups: IndexMap<&'a str, Vec<&'a str>>,
    iso_string: &'a IsoStringConfig,
}

/// Loads the configured document and runs one resolution pass over it.
pub fn run_pass(config: &TypegenConfig) -> CliResult<ParsedApi> {
    let input = config.input_path()?;
    tracing::info!(input = %input.display(), "resolving document");

    let document = Document::from_path(input)?;
    let parsed = SchemaParser::new(&document, config.parser_options()?).parse()?;
    Ok(parsed)
}

/// Renders the dump for `parsed`.
pub fn render(parsed: &ParsedApi, iso_string: &IsoStringConfig, format: OutputFormat) -> CliResult<String> {
    let groups: IndexMap<&str, Vec<&str>> = parsed
        .group_by_tag()
        .into_iter()
        .map(|(tag, apis)| (tag, apis.into_iter().map(|api| api.name.as_str()).collect()))
        .collect();

    let dump = Dump {
        types: &parsed.types,
        apis: &parsed.apis,
        groups,
        iso_string,
    };

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&dump)
            .map_err(|e| CliError::General(format!("Failed to serialize JSON: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(&dump)
            .map_err(|e| CliError::General(format!("Failed to serialize YAML: {}", e))),
    }
}

/// Executes the resolve command.
pub fn execute(args: &ResolveArgs, mut config: TypegenConfig) -> CliResult<()> {
    args.source.apply_to(&mut config);
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }

    let parsed = run_pass(&config)?;
    let rendered = render(&parsed, &config.iso_string, args.format)?;

    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            tracing::info!(output = %path.display(), "dump written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
