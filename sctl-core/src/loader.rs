use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::InputError;
use crate::model::InputDocument;

/// Read and parse the JSON input document at `path`.
pub fn load_input(path: &Path) -> Result<InputDocument, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let input = parse_input(&raw).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        hosts_refs = input.topology.len(),
        quotas = input.quotas.len(),
        "loaded input document"
    );
    Ok(input)
}

/// Parse a JSON input document.
pub fn parse_input(raw: &str) -> Result<InputDocument, serde_json::Error> {
    serde_json::from_str(raw)
}
