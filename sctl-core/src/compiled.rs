//! Compiled per-quota documents, ready for XML export.
//!
//! These trees own all of their data. Cloning one yields an independent
//! copy, which is how alias documents are produced.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledDocument {
    pub browsers: Vec<CompiledBrowser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledBrowser {
    pub name: String,
    pub default_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<String>,
    pub versions: Vec<CompiledVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledVersion {
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub regions: Vec<CompiledRegion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledRegion {
    pub name: String,
    pub hosts: Vec<CompiledHost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledHost {
    pub name: String,
    pub port: u16,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnc: Option<String>,
}

impl CompiledDocument {
    /// Total number of host entries across all browsers, versions and regions.
    pub fn host_count(&self) -> usize {
        self.browsers
            .iter()
            .flat_map(|b| &b.versions)
            .flat_map(|v| &v.regions)
            .map(|r| r.hosts.len())
            .sum()
    }
}
