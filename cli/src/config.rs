#![deny(missing_docs)]

//! # Configuration
//!
//! Loads the tool configuration from a YAML or JSON file and turns it into
//! [`ParserOptions`] for the core pass.
//!
//! ```yaml
//! input: openapi.yaml
//! output: api.json
//! stripPrefix: "/v1/"
//! isoString:
//!   typeName: Dayjs
//!   import: "import { Dayjs } from 'dayjs';"
//! ```

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use typegen_core::{ParserOptions, PrefixPattern};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "typegen.config.yaml";

/// Replacement type for `format: date-time` strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IsoStringConfig {
    /// Type name substituted for date-time strings.
    pub type_name: String,
    /// Import line the emitter adds when the type is used.
    pub import: String,
}

impl Default for IsoStringConfig {
    fn default() -> Self {
        Self {
            type_name: "string".to_string(),
            import: String::new(),
        }
    }
}

/// Document-related flags shared by every command; they override the file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// Regex; path text up to and including its first match is dropped before naming.
    #[clap(long)]
    pub strip_prefix: Option<String>,

    /// Type name substituted for `format: date-time` strings.
    #[clap(long)]
    pub iso_type: Option<String>,
}

impl SourceArgs {
    /// Overrides `config` with every flag that was given.
    pub fn apply_to(&self, config: &mut TypegenConfig) {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(pattern) = &self.strip_prefix {
            config.strip_prefix = Some(pattern.clone());
        }
        if let Some(name) = &self.iso_type {
            config.iso_string.type_name = name.clone();
        }
    }
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypegenConfig {
    /// OpenAPI document to read.
    pub input: Option<PathBuf>,
    /// Where to write the dump (stdout when absent).
    pub output: Option<PathBuf>,
    /// Regex; path text up to and including its first match is dropped before naming.
    pub strip_prefix: Option<String>,
    /// Date-time substitution.
    pub iso_string: IsoStringConfig,
}

impl TypegenConfig {
    /// Reads a config file. `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed: Result<Self, String> = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| CliError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Loads `explicit` if given (it must exist), otherwise the default file
    /// when present, otherwise an empty config.
    pub fn discover(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    tracing::debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// The document path, which must come from the file or `--input`.
    pub fn input_path(&self) -> CliResult<&Path> {
        self.input
            .as_deref()
            .ok_or_else(|| CliError::Config("No input document: set `input` or pass --input".into()))
    }

    /// Builds the core parser options.
    pub fn parser_options(&self) -> CliResult<ParserOptions> {
        let mut options =
            ParserOptions::default().with_iso_string_type(self.iso_string.type_name.as_str());
        if let Some(pattern) = &self.strip_prefix {
            let normalizer = PrefixPattern::new(pattern).map_err(|e| {
                CliError::Config(format!("Invalid stripPrefix pattern '{}': {}", pattern, e))
            })?;
            options = options.with_path_normalizer(normalizer);
        }
        Ok(options)
    }
}
