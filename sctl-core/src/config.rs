//! Run configuration, built once by the command line layer and passed down.

use std::path::PathBuf;

pub const DEFAULT_INPUT_FILE: &str = "input.json";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = ".";

/// Settings for `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub input_file: PathBuf,
    pub output_directory: PathBuf,
    /// Print documents to stdout instead of writing files.
    pub dry_run: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            dry_run: false,
        }
    }
}

/// Settings for `stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatConfig {
    pub input_file: PathBuf,
    /// Report only this quota or alias; `None` reports all of them.
    pub quota_name: Option<String>,
}

impl StatConfig {
    /// An empty quota name selects every quota.
    pub fn new(input_file: impl Into<PathBuf>, quota_name: &str) -> Self {
        Self {
            input_file: input_file.into(),
            quota_name: (!quota_name.is_empty()).then(|| quota_name.to_string()),
        }
    }
}

impl Default for StatConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_FILE, "")
    }
}
