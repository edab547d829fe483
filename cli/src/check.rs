#![deny(missing_docs)]

//! # Check Command
//!
//! Runs the pass and reports named references that nothing defines
//! (dangling `$ref`s). The pass itself accepts them; this is where they surface.

use crate::config::{SourceArgs, TypegenConfig};
use crate::error::{CliError, CliResult};
use crate::resolve::run_pass;

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Document source flags.
    #[clap(flatten)]
    pub source: SourceArgs,
}

/// Executes the check. Fails when at least one reference dangles.
pub fn execute(args: &CheckArgs, mut config: TypegenConfig) -> CliResult<()> {
    args.source.apply_to(&mut config);

    let parsed = run_pass(&config)?;
    let dangling = parsed.dangling_references(&config.iso_string.type_name);

    if !dangling.is_empty() {
        return Err(CliError::General(format!(
            "{} undefined type reference(s): {}",
            dangling.len(),
            dangling.join(", ")
        )));
    }

    println!(
        "OK: {} types, {} operations",
        parsed.types.len(),
        parsed.apis.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(doc: &str) -> (tempfile::TempDir, TypegenConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("openapi.yaml");
        fs::write(&input, doc).unwrap();
        let config = TypegenConfig {
            input: Some(input),
            ..TypegenConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn test_clean_document_passes() {
        let (_dir, config) = config_for(
            r#"
openapi: 3.0.0
components:
  schemas:
    Tag: {type: object, properties: {label: {type: string}}}
    Pet: {type: object, properties: {tag: {$ref: '#/components/schemas/Tag'}}}
"#,
        );
        let args = CheckArgs {
            source: SourceArgs::default(),
        };
        execute(&args, config).unwrap();
    }

    #[test]
    fn test_dangling_reference_fails() {
        let (_dir, config) = config_for(
            r#"
openapi: 3.0.0
components:
  schemas:
    Pet: {type: object, properties: {owner: {$ref: '#/components/schemas/Owner'}}}
"#,
        );
        let args = CheckArgs {
            source: SourceArgs::default(),
        };
        match execute(&args, config) {
            Err(CliError::General(msg)) => assert!(msg.contains("Owner")),
            other => panic!("expected dangling reference error, got {:?}", other),
        }
    }
}
