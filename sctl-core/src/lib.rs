//! sctl-core: grid router quota compiler
//!
//! Compiles a JSON description of host topology and per-tenant browser quotas
//! into one XML configuration per quota (and per alias):
//! - Input model and JSON loading
//! - Host and port range expansion
//! - Alias and hosts-reference resolution
//! - Version/platform splitting and VNC URL templating
//! - Quota compilation and XML export
//! - Capacity statistics
//!
//! The command line layer lives in the `sctl` binary; this crate performs no
//! process-level side effects.

pub mod compiled;
pub mod compiler;
pub mod config;
pub mod emit;
pub mod enrich;
pub mod error;
pub mod export_xml;
pub mod loader;
pub mod model;
pub mod pattern;
pub mod pipeline;
pub mod resolve;
pub mod stat;

// Re-export commonly used types
pub use compiled::{
    CompiledBrowser, CompiledDocument, CompiledHost, CompiledRegion, CompiledVersion,
};
pub use compiler::{compile_all, compile_quota, Compilation};
pub use config::{GenerateConfig, StatConfig};
pub use error::{CompileError, ExportError, InputError, OutputError, SctlError};
pub use export_xml::document_to_xml;
pub use loader::{load_input, parse_input};
pub use model::{Browser, HostSpec, InputDocument, Quota, Topology};
pub use pipeline::{run_generate, run_stat};
pub use stat::{quota_stats, QuotaStat};
