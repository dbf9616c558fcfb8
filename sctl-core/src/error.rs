//! Error types for the sctl compiler
//!
//! Every fatal condition is returned up the call chain as one of these
//! types. Only the binary decides how an error turns into an exit code.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for a compilation run
#[derive(Error, Debug)]
pub enum SctlError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// The input document could not be read or parsed
#[derive(Error, Debug)]
pub enum InputError {
    #[error("error reading input file [{}]: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error parsing input file [{}]: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Unresolvable references in an otherwise well-formed input document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Missing host reference {hosts_ref} for browser {origin}")]
    UnresolvedHostsRef {
        hosts_ref: String,
        origin: VersionOrigin,
    },

    #[error("Missing reference quota {0}")]
    UnresolvedAliasTarget(String),

    #[error("Duplicate output name {0}")]
    DuplicateOutputName(String),

    #[error("Missing quota {0}")]
    UnknownQuota(String),
}

/// Identifies one browser version inside one quota, rendered `quota:browser:version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOrigin {
    pub quota: String,
    pub browser: String,
    pub version: String,
}

impl VersionOrigin {
    pub fn new(quota: &str, browser: &str, version: &str) -> Self {
        Self {
            quota: quota.to_string(),
            browser: browser.to_string(),
            version: version.to_string(),
        }
    }
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.quota, self.browser, self.version)
    }
}

/// XML rendering failures
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("error rendering XML for {name}: {message}")]
    Xml { name: String, message: String },

    #[error("rendered XML for {name} is not valid UTF-8: {source}")]
    Utf8 {
        name: String,
        source: std::string::FromUtf8Error,
    },
}

/// Persistence failures
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("error saving to output file [{}]: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error printing output: {0}")]
    Stdout(#[source] std::io::Error),
}

pub type Result<T, E = SctlError> = std::result::Result<T, E>;
