//! Persistence of compiled documents: files on disk or a dry-run listing.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::compiler::Compilation;
use crate::error::{ExportError, OutputError};
use crate::export_xml::document_to_xml;

/// A compiled document rendered to XML, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub body: String,
}

/// Path of the XML file for output `name`.
///
/// A leading `.` is dropped, so the default directory yields `name.xml`.
pub fn output_path(output_directory: &Path, name: &str) -> PathBuf {
    output_directory
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .join(format!("{}.xml", name))
}

/// Render every document in name order.
///
/// Nothing is persisted here, so a rendering failure leaves the output
/// directory untouched.
pub fn render_all(
    compilation: &Compilation,
    output_directory: &Path,
) -> Result<Vec<RenderedFile>, ExportError> {
    compilation
        .iter()
        .map(|(name, document)| -> Result<RenderedFile, ExportError> {
            Ok(RenderedFile {
                path: output_path(output_directory, name),
                body: document_to_xml(name, document)?,
            })
        })
        .collect()
}

pub fn write_files(files: &[RenderedFile]) -> Result<(), OutputError> {
    for file in files {
        fs::write(&file.path, &file.body).map_err(|source| OutputError::Write {
            path: file.path.clone(),
            source,
        })?;
    }
    info!(files = files.len(), "wrote output files");
    Ok(())
}

/// Print each file as `path`, `---`, body, `---`.
pub fn print_files<W: Write>(files: &[RenderedFile], out: &mut W) -> Result<(), OutputError> {
    for file in files {
        writeln!(out, "{}", file.path.display()).map_err(OutputError::Stdout)?;
        writeln!(out, "---").map_err(OutputError::Stdout)?;
        writeln!(out, "{}", file.body).map_err(OutputError::Stdout)?;
        writeln!(out, "---").map_err(OutputError::Stdout)?;
    }
    Ok(())
}
