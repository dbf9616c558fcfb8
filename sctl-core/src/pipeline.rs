//! End-to-end runs behind the `generate` and `stat` commands.

use std::io::Write;

use tracing::{info, warn};

use crate::compiler::compile_all;
use crate::config::{GenerateConfig, StatConfig};
use crate::emit::{print_files, render_all, write_files};
use crate::error::{OutputError, Result};
use crate::loader::load_input;
use crate::stat::quota_stats;

/// Load, compile, render and persist. Returns the number of documents emitted.
///
/// Every document is compiled and rendered before the first file is written.
pub fn run_generate<W: Write>(config: &GenerateConfig, out: &mut W) -> Result<usize> {
    let input = load_input(&config.input_file)?;
    let compilation = compile_all(&input)?;
    if compilation.is_empty() {
        warn!(
            input = %config.input_file.display(),
            "input defines no quotas, nothing to generate"
        );
    }
    let files = render_all(&compilation, &config.output_directory)?;

    if config.dry_run {
        print_files(&files, out)?;
    } else {
        write_files(&files)?;
        info!(
            directory = %config.output_directory.display(),
            documents = files.len(),
            "generated quota files"
        );
    }
    Ok(files.len())
}

/// Print capacity statistics for the configured quota, or for all quotas.
pub fn run_stat<W: Write>(config: &StatConfig, out: &mut W) -> Result<()> {
    let input = load_input(&config.input_file)?;
    let stats = quota_stats(&input, config.quota_name.as_deref())?;
    for stat in &stats {
        write!(out, "{}", stat).map_err(OutputError::Stdout)?;
    }
    Ok(())
}
