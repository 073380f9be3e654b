//! Parameters derived from the environment and CLI input.

use super::env::{env_or, ENV_HOSTPORT, ENV_POW_PROVIDER, ENV_PROXY};
use url::Url;

/// Default API endpoint host when [`ENV_HOSTPORT`] is unset.
pub const DEFAULT_API_HOST: &str = "origin-fallback.nxtrace.org";
/// Default port appended when the endpoint omits one.
pub const DEFAULT_API_PORT: &str = "443";
/// Default proof-of-work provider token.
pub const DEFAULT_POW_PROVIDER: &str = "api.nxtrace.org";
/// Hostname behind the `sakura` proof-of-work token.
const SAKURA_POW_HOST: &str = "pow.nexttrace.owo.13a.com";

/// API endpoint from the environment, split into host and port.
pub fn host_and_port() -> (String, String) {
    split_host_port(&env_or(ENV_HOSTPORT, DEFAULT_API_HOST))
}

/// Splits `host[:port]` into its parts, defaulting the port to 443.
///
/// Bracketed IPv6 literals are supported: `[::1]:8080` splits into `::1`
/// and `8080`. A bare host gets the default port.
pub fn split_host_port(raw: &str) -> (String, String) {
    let (host, port) = if let Some(rest) = raw.strip_prefix('[') {
        match rest.split_once(']') {
            Some((host, tail)) => (
                host.to_string(),
                tail.strip_prefix(':').unwrap_or("").to_string(),
            ),
            None => (rest.to_string(), String::new()),
        }
    } else {
        let mut parts = raw.split(':');
        let host = parts.next().unwrap_or("").to_string();
        (host, parts.next().unwrap_or("").to_string())
    };

    if port.is_empty() {
        (host, DEFAULT_API_PORT.to_string())
    } else {
        (host, port)
    }
}

/// Outbound proxy from [`ENV_PROXY`].
///
/// A malformed value is logged and dropped rather than failing the run; the
/// trace then goes out directly.
pub fn proxy_url() -> Option<Url> {
    let raw = env_or(ENV_PROXY, "");
    if raw.is_empty() {
        return None;
    }

    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(proxy = %raw, error = %e, "ignoring unparsable proxy URL");
            None
        }
    }
}

/// Proof-of-work provider hostname.
///
/// Preference order: explicit non-empty `param`, then [`ENV_POW_PROVIDER`],
/// then the built-in default token. Only the `sakura` token maps to a
/// dedicated host; every other token, the default included, yields an empty
/// string and the caller falls back to its own endpoint.
pub fn pow_provider(param: Option<&str>) -> String {
    let provider = match param {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => env_or(ENV_POW_PROVIDER, DEFAULT_POW_PROVIDER),
    };

    if provider == "sakura" {
        return SAKURA_POW_HOST.to_string();
    }
    String::new()
}

/// User-agent string advertised to data-provider APIs.
pub fn user_agent() -> String {
    format!(
        "TraceNet {}/{}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
