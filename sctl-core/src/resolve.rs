use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CompileError, VersionOrigin};
use crate::model::{Quota, RegionSet, Topology};

/// Map every alias name to the canonical quota it copies.
///
/// Fails on the first alias section whose target is not a known quota, and on
/// any output name that would be produced twice (an alias shadowing a quota, or
/// the same alias listed under two quotas).
pub fn resolve_aliases(
    quotas: &BTreeMap<String, Quota>,
    aliases: &BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<String, String>, CompileError> {
    let mut resolved = BTreeMap::new();
    let mut seen: BTreeSet<&str> = quotas.keys().map(String::as_str).collect();

    for (quota_name, alias_list) in aliases {
        if !quotas.contains_key(quota_name) {
            return Err(CompileError::UnresolvedAliasTarget(quota_name.clone()));
        }
        for alias in alias_list {
            if !seen.insert(alias.as_str()) {
                return Err(CompileError::DuplicateOutputName(alias.clone()));
            }
            resolved.insert(alias.clone(), quota_name.clone());
        }
    }

    Ok(resolved)
}

/// Look up the regions a browser version points at.
pub fn resolve_hosts_ref<'a>(
    topology: &'a Topology,
    hosts_ref: &str,
    origin: &VersionOrigin,
) -> Result<&'a RegionSet, CompileError> {
    topology
        .get(hosts_ref)
        .ok_or_else(|| CompileError::UnresolvedHostsRef {
            hosts_ref: hosts_ref.to_string(),
            origin: origin.clone(),
        })
}
