use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Topology ──

/// Hosts-reference name → regions.
pub type Topology = BTreeMap<String, RegionSet>;

/// Region name → host groups.
pub type RegionSet = BTreeMap<String, HostGroup>;

/// Host pattern (e.g. `host-[01:20]`) → host settings.
pub type HostGroup = BTreeMap<String, HostSpec>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSpec {
    pub port: u16,
    pub count: u32,
    /// Optional port range (e.g. `444[5:8]`); when absent only `port` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnc: Option<String>,
}

// ── Quotas ──

/// Browser name → browser settings.
pub type Quota = BTreeMap<String, Browser>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Browser {
    pub default_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<String>,
    /// Version key (`version[@platform]`) → hosts-reference name.
    #[serde(default)]
    pub versions: BTreeMap<String, String>,
}

// ── Top-level document ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDocument {
    #[serde(rename = "hosts", default)]
    pub topology: Topology,
    #[serde(rename = "quota", default)]
    pub quotas: BTreeMap<String, Quota>,
    /// Canonical quota name → alias names, in declaration order.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}
