//! Process-environment access with optional debug echo.

use std::env;

/// Enables echoing of every environment read to standard output.
pub const ENV_DEBUG: &str = "NEXTTRACE_DEBUG";
/// Suppresses MPLS label display (consumed by the trace-display layer).
pub const ENV_DISABLE_MPLS: &str = "NEXTTRACE_DISABLEMPLS";
/// Redacts the destination IP (consumed by the output-redaction layer).
pub const ENV_HIDE_DEST_IP: &str = "NEXTTRACE_ENABLEHIDDENDSTIP";
/// Path to a local IP-info database.
pub const ENV_IPINFO_LOCAL_PATH: &str = "NEXTTRACE_IPINFOLOCALPATH";
/// Disables local-endpoint caching so each probe gets a fresh source port.
pub const ENV_RANDOM_PORT: &str = "NEXTTRACE_RANDOMPORT";
/// Auth token for the data-provider API.
pub const ENV_TOKEN: &str = "NEXTTRACE_TOKEN";
/// Disables pause-on-interrupt in the trace loop.
pub const ENV_UNINTERRUPTED: &str = "NEXTTRACE_UNINTERRUPTED";
/// Overrides the default API endpoint (`host[:port]`).
pub const ENV_HOSTPORT: &str = "NEXTTRACE_HOSTPORT";
/// Outbound proxy URL.
pub const ENV_PROXY: &str = "NEXTTRACE_PROXY";
/// Proof-of-work provider token.
pub const ENV_POW_PROVIDER: &str = "NEXTTRACE_POWPROVIDER";

/// Environment value for `key`, or `fallback` when the variable is unset.
///
/// When [`ENV_DEBUG`] is set, every read of a present variable is echoed to
/// stdout so a user can see exactly which knobs a run picked up. There are
/// no other side effects.
pub fn env_or(key: &str, fallback: &str) -> String {
    match env::var(key) {
        Ok(value) => {
            if env::var_os(ENV_DEBUG).is_some() {
                println!("ENV {key} detected as {value}");
            }
            value
        }
        Err(_) => fallback.to_string(),
    }
}

/// Snapshot of every recognized environment variable.
///
/// Loaded once per [`NetContext`](crate::context::NetContext). Flag
/// variables follow the shell convention that any non-empty value means
/// "set". Several fields are pass-through for external layers, but all
/// environment access funnels through this module.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Suppress MPLS label display in the trace output.
    pub disable_mpls: bool,
    /// Redact the destination IP in the trace output.
    pub hide_destination_ip: bool,
    /// Path to a local IP-info database, empty when unset.
    pub ipinfo_local_path: String,
    /// Bypass local-endpoint caching; each probe binds a fresh source port.
    pub random_port: bool,
    /// Auth token for the data-provider API, empty when unset.
    pub token: String,
    /// Do not pause the trace loop on interrupt.
    pub uninterrupted: bool,
}

impl EnvConfig {
    /// Reads the current process environment into a snapshot.
    pub fn load() -> Self {
        Self {
            disable_mpls: !env_or(ENV_DISABLE_MPLS, "").is_empty(),
            hide_destination_ip: !env_or(ENV_HIDE_DEST_IP, "").is_empty(),
            ipinfo_local_path: env_or(ENV_IPINFO_LOCAL_PATH, ""),
            random_port: !env_or(ENV_RANDOM_PORT, "").is_empty(),
            token: env_or(ENV_TOKEN, ""),
            uninterrupted: !env_or(ENV_UNINTERRUPTED, "").is_empty(),
        }
    }
}
