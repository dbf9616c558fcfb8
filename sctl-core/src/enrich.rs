//! Per-field enrichment: platform tags on version keys and VNC URLs.

/// Directive value that selects the built-in Selenoid VNC endpoint.
pub const SELENOID_VNC: &str = "selenoid";

/// Placeholder replaced with the concrete host name in custom VNC directives.
pub const HOST_NAME_TOKEN: &str = "$hostName";

/// Split `version@platform` on the first `@`.
///
/// Everything after the first separator belongs to the platform, including
/// further `@` characters. Without a separator the platform is empty.
pub fn split_version_platform(key: &str) -> (&str, &str) {
    key.split_once('@').unwrap_or((key, ""))
}

/// Build the VNC URL for one host, or `None` when no directive is configured.
pub fn resolve_vnc(host_name: &str, port: u16, directive: &str) -> Option<String> {
    match directive {
        "" => None,
        SELENOID_VNC => Some(format!("ws://{}:{}/vnc", host_name, port)),
        custom => Some(custom.replace(HOST_NAME_TOKEN, host_name)),
    }
}
