#![deny(missing_docs)]

//! # Typegen CLI
//!
//! Command Line Interface over the OpenAPI type resolver.
//!
//! Supported Commands:
//! - `resolve`: Dumps the type registry and operation descriptors as JSON/YAML.
//! - `check`: Reports type references that nothing defines.

use crate::config::TypegenConfig;
use crate::error::CliResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod config;
mod error;
mod resolve;
mod telemetry;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI type registry generator")]
struct Cli {
    /// Config file (YAML or JSON). Defaults to `typegen.config.yaml` when present.
    #[clap(long, global = true, env = "TYPEGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter directive (e.g. `info`, `typegen_core=debug`).
    #[clap(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a document and dump types and operation descriptors.
    Resolve(resolve::ResolveArgs),
    /// Report references to types that are never defined.
    Check(check::CheckArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log_level);

    let config = TypegenConfig::discover(cli.config.as_deref())?;

    match &cli.command {
        Commands::Resolve(args) => resolve::execute(args, config)?,
        Commands::Check(args) => check::execute(args, config)?,
    }

    Ok(())
}
