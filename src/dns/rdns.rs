//! Reverse-DNS lookups with process-lifetime memoization.
//!
//! Every probe worker wants the hostname for the hops it discovers, and the
//! same routers show up on every trace round. Lookups are memoized per
//! address forever; entries are never evicted.

use super::providers::system_resolver;
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::{future::Future, net::IpAddr, pin::Pin, sync::Arc};

/// Alias for the `Future` type returned by a reverse resolver.
pub type ReverseResolving = Pin<Box<dyn Future<Output = Result<Vec<String>, NetError>> + Send>>;

/// Trait for PTR (address-to-hostname) resolution.
///
/// Mirrors [`Resolve`](super::Resolve) for the reverse direction so the cache
/// can be exercised against an instrumented fake in tests.
pub trait ReverseResolve: Send + Sync {
    /// Resolves an address to its PTR names.
    fn reverse(&self, addr: IpAddr) -> ReverseResolving;
}

/// Blanket implementation for Arc-wrapped reverse resolvers.
impl<R: ReverseResolve + ?Sized> ReverseResolve for Arc<R> {
    fn reverse(&self, addr: IpAddr) -> ReverseResolving {
        (**self).reverse(addr)
    }
}

/// PTR resolution through the shared system resolver.
#[derive(Clone, Debug, Default)]
pub struct SystemReverseResolver;

impl SystemReverseResolver {
    /// Creates a new `SystemReverseResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl ReverseResolve for SystemReverseResolver {
    fn reverse(&self, addr: IpAddr) -> ReverseResolving {
        Box::pin(async move {
            tracing::debug!(addr = %addr, "reverse lookup via system resolver");
            let lookup = system_resolver().reverse_lookup(addr).await.map_err(|e| {
                tracing::debug!(addr = %addr, error = %e, "reverse lookup failed");
                NetError::reverse_failed(addr, e)
            })?;

            let names: Vec<String> = lookup.iter().map(|ptr| ptr.to_string()).collect();
            if names.is_empty() {
                return Err(NetError::reverse_failed(addr, "no PTR records returned"));
            }
            Ok(names)
        })
    }
}

/// Memoizing reverse-DNS cache.
///
/// A hit returns the single cached name. A miss consults the back-end: on
/// success the **first** returned name is cached (even when the lookup
/// returned several) and the full list is passed through; a failed lookup
/// caches nothing so the address is retried next time.
///
/// Concurrent readers and writers are fine; racing writers to one key are
/// last-writer-wins, which is harmless because PTR answers for an address
/// are stable.
pub struct RdnsCache {
    entries: DashMap<IpAddr, String>,
    resolver: Arc<dyn ReverseResolve>,
}

impl RdnsCache {
    /// Creates a cache backed by the system resolver.
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(SystemReverseResolver::new()))
    }

    /// Creates a cache backed by a custom reverse resolver.
    pub fn with_resolver(resolver: Arc<dyn ReverseResolve>) -> Self {
        Self {
            entries: DashMap::new(),
            resolver,
        }
    }

    /// Hostname(s) for `addr`, from cache when possible.
    pub async fn lookup(&self, addr: IpAddr) -> Result<Vec<String>, NetError> {
        if let Some(hit) = self.entries.get(&addr) {
            return Ok(vec![hit.value().clone()]);
        }

        let names = self.resolver.reverse(addr).await?;
        if let Some(first) = names.first() {
            self.entries.insert(addr, first.clone());
        }
        Ok(names)
    }

    /// Number of cached addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RdnsCache {
    fn default() -> Self {
        Self::new()
    }
}
