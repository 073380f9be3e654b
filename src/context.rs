//! Session-owned network-identity state.
//!
//! One trace session owns one [`NetContext`]; independent sessions get fully
//! independent caches, and tests inject their own back-ends instead of
//! fighting over process globals.

use crate::base::neterror::NetError;
use crate::config::env::EnvConfig;
use crate::dns::destination::{lookup_destination, CandidateSelector, ConsoleSelector, IpFamily};
use crate::dns::providers::resolver_for_token;
use crate::dns::rdns::{RdnsCache, ReverseResolve};
use crate::identity::{LocalEndpoint, LocalIdentity};
use std::net::IpAddr;
use std::sync::Arc;

/// Aggregates the environment snapshot, the local-identity cache and the
/// reverse-DNS cache for one trace session.
pub struct NetContext {
    env: EnvConfig,
    identity: LocalIdentity,
    rdns: RdnsCache,
}

impl NetContext {
    /// Builds a context from the current process environment.
    pub fn from_env() -> Self {
        Self::with_env(EnvConfig::load())
    }

    /// Builds a context from an explicit environment snapshot.
    pub fn with_env(env: EnvConfig) -> Self {
        Self {
            identity: LocalIdentity::new(env.random_port),
            rdns: RdnsCache::new(),
            env,
        }
    }

    /// Replaces the reverse-DNS back-end, dropping any cached entries.
    pub fn with_reverse_resolver(mut self, resolver: Arc<dyn ReverseResolve>) -> Self {
        self.rdns = RdnsCache::with_resolver(resolver);
        self
    }

    /// The environment snapshot this context was built from.
    pub fn env(&self) -> &EnvConfig {
        &self.env
    }

    /// Local outbound endpoint toward `dst`; see [`LocalIdentity::resolve`].
    pub fn local_endpoint(&self, dst: IpAddr) -> Option<LocalEndpoint> {
        self.identity.resolve(dst)
    }

    /// Cached reverse-DNS lookup; see [`RdnsCache::lookup`].
    pub async fn lookup_addr(&self, addr: IpAddr) -> Result<Vec<String>, NetError> {
        self.rdns.lookup(addr).await
    }

    /// Resolves a destination host through the token-selected resolver.
    ///
    /// With `interactive` false, ambiguous resolutions collapse to the first
    /// candidate instead of prompting on the console.
    pub async fn resolve_destination(
        &self,
        host: &str,
        family: IpFamily,
        resolver_token: &str,
        interactive: bool,
    ) -> Result<IpAddr, NetError> {
        let resolver = resolver_for_token(resolver_token);
        let console = ConsoleSelector::new();
        let selector: Option<&dyn CandidateSelector> =
            if interactive { Some(&console) } else { None };
        lookup_destination(host, family, resolver.as_ref(), selector).await
    }
}
