//! Quota compilation
//!
//! Turns the parsed input document into one [`CompiledDocument`] per quota and
//! per alias. Compilation is a pure function of the input: it performs no I/O
//! and either produces every document or fails as a whole.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::compiled::{
    CompiledBrowser, CompiledDocument, CompiledHost, CompiledRegion, CompiledVersion,
};
use crate::enrich::{resolve_vnc, split_version_platform};
use crate::error::{CompileError, VersionOrigin};
use crate::model::{Browser, HostSpec, InputDocument, Quota, RegionSet, Topology};
use crate::pattern::{expand_host_pattern, expand_port_pattern};
use crate::resolve::{resolve_aliases, resolve_hosts_ref};

/// All compiled documents of one run, keyed by output name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    documents: BTreeMap<String, CompiledDocument>,
}

impl Compilation {
    /// Output names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledDocument> {
        self.documents.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CompiledDocument> {
        self.documents.get_mut(name)
    }

    /// Documents in output name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompiledDocument)> {
        self.documents.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Compile every quota and copy each one into its alias slots.
///
/// Alias targets are validated before any quota is compiled. Each alias gets
/// its own deep copy of the canonical document.
pub fn compile_all(input: &InputDocument) -> Result<Compilation, CompileError> {
    let alias_targets = resolve_aliases(&input.quotas, &input.aliases)?;

    let mut documents = BTreeMap::new();
    for (quota_name, quota) in &input.quotas {
        let document = compile_quota(quota_name, quota, &input.topology)?;
        documents.insert(quota_name.clone(), document);
    }

    for (alias, target) in alias_targets {
        let document = documents
            .get(&target)
            .cloned()
            .ok_or_else(|| CompileError::UnresolvedAliasTarget(target.clone()))?;
        debug!(alias = %alias, quota = %target, "copied alias document");
        documents.insert(alias, document);
    }

    info!(
        quotas = input.quotas.len(),
        documents = documents.len(),
        "compiled quotas"
    );
    Ok(Compilation { documents })
}

/// Compile a single quota against the topology.
pub fn compile_quota(
    quota_name: &str,
    quota: &Quota,
    topology: &Topology,
) -> Result<CompiledDocument, CompileError> {
    let browsers = quota
        .iter()
        .map(|(browser_name, browser)| {
            compile_browser(quota_name, browser_name, browser, topology)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let document = CompiledDocument { browsers };
    debug!(
        quota = quota_name,
        browsers = document.browsers.len(),
        hosts = document.host_count(),
        "compiled quota"
    );
    Ok(document)
}

fn compile_browser(
    quota_name: &str,
    browser_name: &str,
    browser: &Browser,
    topology: &Topology,
) -> Result<CompiledBrowser, CompileError> {
    let mut versions = Vec::with_capacity(browser.versions.len());
    for (version_key, hosts_ref) in &browser.versions {
        let origin = VersionOrigin::new(quota_name, browser_name, version_key);
        let regions = resolve_hosts_ref(topology, hosts_ref, &origin)?;
        let (number, platform) = split_version_platform(version_key);

        versions.push(CompiledVersion {
            number: number.to_string(),
            platform: non_empty(platform),
            regions: compile_regions(regions),
        });
    }

    Ok(CompiledBrowser {
        name: browser_name.to_string(),
        default_version: browser.default_version.clone(),
        default_platform: browser.default_platform.as_deref().and_then(non_empty),
        versions,
    })
}

fn compile_regions(regions: &RegionSet) -> Vec<CompiledRegion> {
    regions
        .iter()
        .map(|(region_name, group)| CompiledRegion {
            name: region_name.clone(),
            hosts: group
                .iter()
                .flat_map(|(pattern, spec)| compile_hosts(pattern, spec))
                .collect(),
        })
        .collect()
}

/// One host entry per expanded name and port, names varying slowest.
fn compile_hosts(pattern: &str, spec: &HostSpec) -> Vec<CompiledHost> {
    let names = expand_host_pattern(pattern);
    let ports = expand_port_pattern(spec.port, spec.ports.as_deref().unwrap_or(""));
    if ports.is_empty() {
        warn!(pattern, "host group has no usable ports, skipping");
    }

    let mut hosts = Vec::new();
    for name in &names {
        for &port in &ports {
            hosts.push(CompiledHost {
                name: name.clone(),
                port,
                count: spec.count,
                username: spec.username.as_deref().and_then(non_empty),
                password: spec.password.as_deref().and_then(non_empty),
                vnc: spec
                    .vnc
                    .as_deref()
                    .and_then(|directive| resolve_vnc(name, port, directive)),
            });
        }
    }
    hosts
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HostGroup;

    fn host(port: u16, count: u32) -> HostSpec {
        HostSpec {
            port,
            count,
            ..HostSpec::default()
        }
    }

    fn topology(entries: Vec<(&str, &str, &str, HostSpec)>) -> Topology {
        let mut topology = Topology::new();
        for (hosts_ref, region, pattern, spec) in entries {
            topology
                .entry(hosts_ref.to_string())
                .or_default()
                .entry(region.to_string())
                .or_insert_with(HostGroup::new)
                .insert(pattern.to_string(), spec);
        }
        topology
    }

    fn browser(default_version: &str, versions: &[(&str, &str)]) -> Browser {
        Browser {
            default_version: default_version.to_string(),
            default_platform: None,
            versions: versions
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn single_quota(name: &str, browser_name: &str, b: Browser) -> BTreeMap<String, Quota> {
        let mut quota = Quota::new();
        quota.insert(browser_name.to_string(), b);
        let mut quotas = BTreeMap::new();
        quotas.insert(name.to_string(), quota);
        quotas
    }

    #[test]
    fn test_range_hosts_expand_into_one_region() {
        let input = InputDocument {
            topology: topology(vec![("region-a", "region-a", "h[1:20]", host(5555, 5))]),
            quotas: single_quota(
                "test-quota",
                "firefox",
                browser("33.0", &[("33.0", "region-a")]),
            ),
            aliases: BTreeMap::new(),
        };

        let compilation = compile_all(&input).unwrap();
        let doc = compilation.get("test-quota").unwrap();
        assert_eq!(doc.browsers.len(), 1);

        let firefox = &doc.browsers[0];
        assert_eq!(firefox.name, "firefox");
        assert_eq!(firefox.default_version, "33.0");
        assert_eq!(firefox.versions.len(), 1);

        let regions = &firefox.versions[0].regions;
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "region-a");

        let hosts = &regions[0].hosts;
        assert_eq!(hosts.len(), 20);
        let names: Vec<String> = hosts.iter().map(|h| h.name.clone()).collect();
        let expected: Vec<String> = (1..=20).map(|i| format!("h{}", i)).collect();
        assert_eq!(names, expected);
        assert!(hosts.iter().all(|h| h.port == 5555 && h.count == 5));
    }

    #[test]
    fn test_missing_hosts_ref_aborts() {
        let input = InputDocument {
            topology: topology(vec![("known", "r", "h", host(4444, 1))]),
            quotas: single_quota("q", "chrome", browser("1", &[("1", "unknown")])),
            aliases: BTreeMap::new(),
        };

        let err = compile_all(&input).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnresolvedHostsRef {
                hosts_ref: "unknown".to_string(),
                origin: VersionOrigin::new("q", "chrome", "1"),
            }
        );
    }

    #[test]
    fn test_aliases_are_independent_copies() {
        let mut aliases = BTreeMap::new();
        aliases.insert("q".to_string(), vec!["alias".to_string()]);
        let input = InputDocument {
            topology: topology(vec![("ref", "r", "h[1:2]", host(4444, 1))]),
            quotas: single_quota("q", "firefox", browser("33.0", &[("33.0", "ref")])),
            aliases,
        };

        let mut compilation = compile_all(&input).unwrap();
        assert_eq!(compilation.names().collect::<Vec<_>>(), vec!["alias", "q"]);
        assert_eq!(compilation.get("alias"), compilation.get("q"));

        compilation.get_mut("alias").unwrap().browsers[0].versions[0].regions[0]
            .hosts
            .clear();

        assert_eq!(compilation.get("q").unwrap().host_count(), 2);
        assert_eq!(compilation.get("alias").unwrap().host_count(), 0);
    }

    #[test]
    fn test_unknown_alias_target_aborts() {
        let mut aliases = BTreeMap::new();
        aliases.insert("ghost".to_string(), vec!["alias".to_string()]);
        let input = InputDocument {
            topology: topology(vec![("ref", "r", "h", host(4444, 1))]),
            quotas: single_quota("q", "firefox", browser("33.0", &[("33.0", "ref")])),
            aliases,
        };

        assert_eq!(
            compile_all(&input).unwrap_err(),
            CompileError::UnresolvedAliasTarget("ghost".to_string())
        );
    }

    #[test]
    fn test_platform_credentials_and_vnc() {
        let spec = HostSpec {
            port: 4444,
            count: 2,
            username: Some("user".to_string()),
            password: Some(String::new()),
            vnc: Some("selenoid".to_string()),
            ..HostSpec::default()
        };
        let mut b = browser("33.0", &[("33.0@LINUX", "ref"), ("34.0", "ref")]);
        b.default_platform = Some(String::new());
        let input = InputDocument {
            topology: topology(vec![("ref", "r", "box-[1:2]", spec)]),
            quotas: single_quota("q", "firefox", b),
            aliases: BTreeMap::new(),
        };

        let compilation = compile_all(&input).unwrap();
        let firefox = &compilation.get("q").unwrap().browsers[0];
        assert_eq!(firefox.default_platform, None);

        let v33 = &firefox.versions[0];
        assert_eq!(v33.number, "33.0");
        assert_eq!(v33.platform.as_deref(), Some("LINUX"));
        let v34 = &firefox.versions[1];
        assert_eq!(v34.number, "34.0");
        assert_eq!(v34.platform, None);

        let first = &v33.regions[0].hosts[0];
        assert_eq!(first.name, "box-1");
        assert_eq!(first.username.as_deref(), Some("user"));
        assert_eq!(first.password, None);
        assert_eq!(first.vnc.as_deref(), Some("ws://box-1:4444/vnc"));
    }

    #[test]
    fn test_port_ranges_multiply_hosts() {
        let spec = HostSpec {
            port: 4444,
            count: 1,
            ports: Some("444[5:6]".to_string()),
            vnc: Some("vnc://$hostName:5900".to_string()),
            ..HostSpec::default()
        };
        let hosts = compile_hosts("h[1:2]", &spec);
        let pairs: Vec<(&str, u16)> = hosts.iter().map(|h| (h.name.as_str(), h.port)).collect();
        assert_eq!(
            pairs,
            vec![("h1", 4445), ("h1", 4446), ("h2", 4445), ("h2", 4446)]
        );
        assert_eq!(hosts[3].vnc.as_deref(), Some("vnc://h2:5900"));
    }

    #[test]
    fn test_unparsable_ports_yield_no_hosts() {
        let spec = HostSpec {
            port: 4444,
            count: 1,
            ports: Some("NaN".to_string()),
            ..HostSpec::default()
        };
        assert!(compile_hosts("h[1:3]", &spec).is_empty());
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let input = InputDocument {
            topology: topology(vec![
                ("ref", "b", "y[1:3]", host(4444, 1)),
                ("ref", "a", "x", host(4444, 1)),
            ]),
            quotas: single_quota(
                "q",
                "firefox",
                browser("2", &[("2", "ref"), ("1", "ref")]),
            ),
            aliases: BTreeMap::new(),
        };

        let first = compile_all(&input).unwrap();
        let second = compile_all(&input.clone()).unwrap();
        assert_eq!(first, second);

        let versions: Vec<&str> = first.get("q").unwrap().browsers[0]
            .versions
            .iter()
            .map(|v| v.number.as_str())
            .collect();
        assert_eq!(versions, vec!["1", "2"]);
    }

    #[test]
    fn test_input_key_order_does_not_matter() {
        let first = crate::loader::parse_input(
            r#"{
                "hosts": {
                    "grid": {
                        "region-a": {
                            "a[1:2]": {"port": 4444, "count": 1},
                            "plain": {"port": 4444, "count": 2, "ports": "444[5:6]"}
                        },
                        "region-b": {"b[01:02]": {"port": 5555, "count": 3}}
                    },
                    "other": {"region-c": {"c": {"port": 4444, "count": 1}}}
                },
                "quota": {
                    "team-a": {
                        "chrome": {"defaultVersion": "60.0", "versions": {"60.0": "grid", "61.0@LINUX": "other"}},
                        "firefox": {"defaultVersion": "33.0", "versions": {"33.0": "grid"}}
                    },
                    "team-b": {"opera": {"defaultVersion": "12.0", "versions": {"12.0": "other"}}}
                },
                "aliases": {"team-a": ["alias-a"]}
            }"#,
        )
        .unwrap();
        let second = crate::loader::parse_input(
            r#"{
                "aliases": {"team-a": ["alias-a"]},
                "quota": {
                    "team-b": {"opera": {"versions": {"12.0": "other"}, "defaultVersion": "12.0"}},
                    "team-a": {
                        "firefox": {"versions": {"33.0": "grid"}, "defaultVersion": "33.0"},
                        "chrome": {"versions": {"61.0@LINUX": "other", "60.0": "grid"}, "defaultVersion": "60.0"}
                    }
                },
                "hosts": {
                    "other": {"region-c": {"c": {"count": 1, "port": 4444}}},
                    "grid": {
                        "region-b": {"b[01:02]": {"count": 3, "port": 5555}},
                        "region-a": {
                            "plain": {"ports": "444[5:6]", "count": 2, "port": 4444},
                            "a[1:2]": {"port": 4444, "count": 1}
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let first = compile_all(&first).unwrap();
        assert_eq!(first, compile_all(&second).unwrap());
        assert_eq!(
            first.names().collect::<Vec<_>>(),
            vec!["alias-a", "team-a", "team-b"]
        );
        let hosts: Vec<(&str, u16)> = first.get("team-a").unwrap().browsers[0].versions[0]
            .regions[0]
            .hosts
            .iter()
            .map(|h| (h.name.as_str(), h.port))
            .collect();
        assert_eq!(
            hosts,
            vec![("a1", 4444), ("a2", 4444), ("plain", 4445), ("plain", 4446)]
        );
    }
}
