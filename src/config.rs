use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::comments::DEFAULT_COMMENT_MARKER;
use crate::message::{default_identifiers, IdentifierSpec};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "xgettext-turbo.json";

/// Configuration for xgettext-turbo
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns for input files (e.g., ["src/**/*.js"])
    #[serde(default = "default_input")]
    pub input: Vec<String>,

    /// Glob patterns for files to skip
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Output directory for the `.pot` files
    #[serde(default = "default_output")]
    pub output: String,

    /// Domain for calls without a domain argument
    #[serde(default = "default_domain")]
    pub default_domain: String,

    /// Translation functions and the roles of their arguments.
    /// Replaces the built-in gettext family when given.
    #[serde(default = "default_identifiers")]
    pub identifiers: IdentifierSpec,

    /// Attach marker comments preceding a call's statement
    #[serde(default = "default_true")]
    pub attach_comment: bool,

    /// Prefix a line comment must start with to be attached.
    /// Must begin with `//`; block comments are never attached.
    #[serde(default = "default_comment_marker")]
    pub comment_marker: String,

    /// Record line/column of each call
    #[serde(default = "default_true")]
    pub locations: bool,
}

fn default_input() -> Vec<String> {
    ["js", "jsx", "ts", "tsx"]
        .iter()
        .map(|ext| format!("src/**/*.{}", ext))
        .collect()
}

fn default_output() -> String {
    "locales".to_string()
}

fn default_domain() -> String {
    "messages".to_string()
}

fn default_comment_marker() -> String {
    DEFAULT_COMMENT_MARKER.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            ignore: Vec::new(),
            output: default_output(),
            default_domain: default_domain(),
            identifiers: default_identifiers(),
            attach_comment: true,
            comment_marker: default_comment_marker(),
            locations: true,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json_string(json_str: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json_str)
            .with_context(|| "Failed to parse config JSON string")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never match anything.
    pub fn validate(&self) -> Result<()> {
        if !self.comment_marker.starts_with("//") {
            bail!(
                "commentMarker must start with \"//\" (got \"{}\"); only line comments are attached",
                self.comment_marker
            );
        }
        Ok(())
    }

    /// Try to load from default config file, or return default config
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Per-run extraction options for `filename`.
    pub fn extract_options(&self, filename: Option<String>) -> crate::extractor::ExtractOptions {
        crate::extractor::ExtractOptions {
            default_domain: self.default_domain.clone(),
            filename,
            identifiers: self.identifiers.clone(),
            attach_comment: self.attach_comment,
            comment_marker: self.comment_marker.clone(),
            locations: self.locations,
        }
    }
}
