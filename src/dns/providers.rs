//! Named DNS resolver back-ends and the token registry.
//!
//! The trace CLI lets the user pick a resolver by token. Known tokens map to
//! DNS-over-HTTPS providers, driven by a bootstrap table so adding a provider
//! is a one-line change; anything else falls back to [`SystemResolver`], the
//! default UDP resolver built from system configuration.

use super::{Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, NameServerConfig, ResolverConfig},
    name_server::TokioConnectionProvider,
    proto::xfer::Protocol,
    TokioResolver,
};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, LazyLock, OnceLock};

/// Bootstrap data for one well-known DoH provider.
struct ProviderSpec {
    token: &'static str,
    host: &'static str,
    ips: &'static [IpAddr],
}

static PROVIDERS: [ProviderSpec; 5] = [
    ProviderSpec {
        token: "dnssb",
        host: "doh.dns.sb",
        ips: &[
            IpAddr::V4(Ipv4Addr::new(185, 222, 222, 222)),
            IpAddr::V4(Ipv4Addr::new(45, 11, 45, 11)),
        ],
    },
    ProviderSpec {
        token: "aliyun",
        host: "dns.alidns.com",
        ips: &[
            IpAddr::V4(Ipv4Addr::new(223, 5, 5, 5)),
            IpAddr::V4(Ipv4Addr::new(223, 6, 6, 6)),
        ],
    },
    ProviderSpec {
        token: "dnspod",
        host: "doh.pub",
        ips: &[
            IpAddr::V4(Ipv4Addr::new(1, 12, 12, 12)),
            IpAddr::V4(Ipv4Addr::new(120, 53, 53, 53)),
        ],
    },
    ProviderSpec {
        token: "google",
        host: "dns.google",
        ips: &[
            IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
            IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
        ],
    },
    ProviderSpec {
        token: "cloudflare",
        host: "cloudflare-dns.com",
        ips: &[
            IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
            IpAddr::V4(Ipv4Addr::new(1, 0, 0, 1)),
        ],
    },
];

/// DNS-over-HTTPS resolver for one of the well-known providers.
///
/// The underlying hickory resolver is built on first use so instances can be
/// created outside a tokio runtime (the CLI wires resolvers up before the
/// runtime starts).
#[derive(Clone)]
pub struct DohResolver {
    spec: &'static ProviderSpec,
    resolver: Arc<OnceLock<TokioResolver>>,
}

impl DohResolver {
    fn new(spec: &'static ProviderSpec) -> Self {
        Self {
            spec,
            resolver: Arc::new(OnceLock::new()),
        }
    }

    /// The token this provider is registered under.
    pub fn token(&self) -> &'static str {
        self.spec.token
    }

    /// The DoH endpoint hostname queries are sent to.
    pub fn endpoint_host(&self) -> &'static str {
        self.spec.host
    }

    fn build(spec: &ProviderSpec) -> TokioResolver {
        let mut config = ResolverConfig::new();
        for ip in spec.ips {
            let mut ns = NameServerConfig::new(SocketAddr::new(*ip, 443), Protocol::Https);
            ns.tls_dns_name = Some(spec.host.into());
            config.add_name_server(ns);
        }

        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        builder.build()
    }
}

impl fmt::Debug for DohResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DohResolver")
            .field("token", &self.spec.token)
            .field("host", &self.spec.host)
            .finish_non_exhaustive()
    }
}

impl Resolve for DohResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let this = self.clone();
        Box::pin(async move {
            let resolver = this.resolver.get_or_init(|| Self::build(this.spec));

            tracing::debug!(domain = %name, provider = this.spec.host, "resolving via DoH");
            let lookup = resolver.lookup_ip(name.as_str()).await.map_err(|e| {
                tracing::debug!(domain = %name, error = %e, "DoH lookup failed");
                NetError::lookup_failed(name.as_str(), e)
            })?;

            let candidates: Vec<IpAddr> = lookup.iter().collect();
            if candidates.is_empty() {
                return Err(NetError::lookup_failed(name.as_str(), "no addresses returned"));
            }
            Ok(candidates)
        })
    }
}

/// Shared resolver built from system DNS configuration (UDP transport).
///
/// Lazily initialized on first query and reused process-wide, for forward
/// lookups here and PTR lookups in the reverse-DNS cache.
static SYSTEM_RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
    let mut builder = match TokioResolver::builder_tokio() {
        Ok(builder) => {
            tracing::debug!("using system DNS configuration");
            builder
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read system DNS config, using defaults");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        }
    };
    builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    builder.build()
});

/// Access to the process-wide system resolver.
pub(crate) fn system_resolver() -> &'static TokioResolver {
    &SYSTEM_RESOLVER
}

/// Default resolver used for unmatched tokens.
///
/// Queries whatever the host is configured with (`/etc/resolv.conf` on Unix)
/// over plain UDP.
#[derive(Clone, Debug, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Creates a new `SystemResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for SystemResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            tracing::debug!(domain = %name, "resolving via system resolver");
            let lookup = system_resolver()
                .lookup_ip(name.as_str())
                .await
                .map_err(|e| {
                    tracing::debug!(domain = %name, error = %e, "system lookup failed");
                    NetError::lookup_failed(name.as_str(), e)
                })?;

            let candidates: Vec<IpAddr> = lookup.iter().collect();
            if candidates.is_empty() {
                return Err(NetError::lookup_failed(name.as_str(), "no addresses returned"));
            }
            Ok(candidates)
        })
    }
}

/// The DoH provider registered under `token`, if any.
pub fn provider_for_token(token: &str) -> Option<DohResolver> {
    PROVIDERS
        .iter()
        .find(|spec| spec.token == token)
        .map(DohResolver::new)
}

/// Maps a resolver token to its back-end.
///
/// Unknown tokens (the empty string included) fall back to the system
/// resolver rather than erroring, so a typo in `--dot-server` still traces.
pub fn resolver_for_token(token: &str) -> Arc<dyn Resolve> {
    match provider_for_token(token) {
        Some(doh) => Arc::new(doh),
        None => Arc::new(SystemResolver::new()),
    }
}
