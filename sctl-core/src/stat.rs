//! Per-quota capacity statistics
//!
//! For every browser version the number of session slots per region is
//! reported: the sum over host groups of expanded hosts × expanded ports ×
//! `count`. Aliases report the numbers of the quota they copy.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use crate::error::{CompileError, VersionOrigin};
use crate::model::{HostGroup, InputDocument, Quota, RegionSet};
use crate::pattern::{expand_host_pattern, expand_port_pattern};
use crate::resolve::{resolve_aliases, resolve_hosts_ref};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStat {
    pub name: String,
    pub versions: Vec<VersionStat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStat {
    pub browser: String,
    /// Version key as written in the input, platform tag included.
    pub version: String,
    pub regions: Vec<RegionStat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStat {
    pub name: String,
    pub total: u64,
}

impl fmt::Display for QuotaStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "---")?;
        for version in &self.versions {
            write!(f, "{} {}", version.browser, version.version)?;
            for region in &version.regions {
                write!(f, " {} = {}", region.name, region.total)?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

/// Collect statistics for one quota or alias, or for all of them in name order.
pub fn quota_stats(
    input: &InputDocument,
    quota_name: Option<&str>,
) -> Result<Vec<QuotaStat>, CompileError> {
    let alias_targets = resolve_aliases(&input.quotas, &input.aliases)?;

    let mut selectable: BTreeMap<&str, &Quota> = input
        .quotas
        .iter()
        .map(|(name, quota)| (name.as_str(), quota))
        .collect();
    for (alias, target) in &alias_targets {
        if let Some(quota) = input.quotas.get(target) {
            selectable.insert(alias.as_str(), quota);
        }
    }

    match quota_name {
        Some(name) => {
            let quota = selectable
                .get(name)
                .ok_or_else(|| CompileError::UnknownQuota(name.to_string()))?;
            Ok(vec![single_quota_stat(name, quota, input)])
        }
        None => Ok(selectable
            .iter()
            .map(|(name, quota)| single_quota_stat(name, quota, input))
            .collect()),
    }
}

fn single_quota_stat(name: &str, quota: &Quota, input: &InputDocument) -> QuotaStat {
    let mut versions = Vec::new();
    for (browser_name, browser) in quota {
        for (version_key, hosts_ref) in &browser.versions {
            let origin = VersionOrigin::new(name, browser_name, version_key);
            let regions = match resolve_hosts_ref(&input.topology, hosts_ref, &origin) {
                Ok(regions) => regions,
                Err(e) => {
                    warn!(error = %e, "skipping version in statistics");
                    continue;
                }
            };
            if regions.is_empty() {
                continue;
            }
            versions.push(VersionStat {
                browser: browser_name.clone(),
                version: version_key.clone(),
                regions: region_stats(regions),
            });
        }
    }

    QuotaStat {
        name: name.to_string(),
        versions,
    }
}

fn region_stats(regions: &RegionSet) -> Vec<RegionStat> {
    regions
        .iter()
        .map(|(region_name, group)| RegionStat {
            name: region_name.clone(),
            total: group_total(group),
        })
        .collect()
}

fn group_total(group: &HostGroup) -> u64 {
    group
        .iter()
        .map(|(pattern, spec)| {
            let hosts = expand_host_pattern(pattern).len() as u64;
            let ports =
                expand_port_pattern(spec.port, spec.ports.as_deref().unwrap_or("")).len() as u64;
            hosts * ports * u64::from(spec.count)
        })
        .sum()
}
