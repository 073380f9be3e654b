//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that the
//! pluggable resolver back-ends implement.

use crate::base::neterror::NetError;
use std::{fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Candidate addresses produced by a lookup, in resolver order.
pub type Candidates = Vec<IpAddr>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Candidates, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// This is the abstraction the destination resolver dispatches on: every
/// named DoH back-end and the default UDP resolver implement it, and tests
/// substitute deterministic fakes. Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Resolution is assumed to always be ready (no backpressure).
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to IP addresses.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_name_from_str() {
        let name = Name::from("example.com");
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn test_name_equality_and_hash() {
        use std::collections::HashSet;

        assert_eq!(Name::new("example.com"), Name::new("example.com"));
        assert_ne!(Name::new("example.com"), Name::new("other.com"));

        let mut set = HashSet::new();
        set.insert(Name::new("example.com"));
        set.insert(Name::new("example.com"));
        assert_eq!(set.len(), 1);
    }

    struct FixedResolver {
        response: Candidates,
    }

    impl Resolve for FixedResolver {
        fn resolve(&self, _name: Name) -> Resolving {
            let addrs = self.response.clone();
            Box::pin(async move { Ok(addrs) })
        }
    }

    #[tokio::test]
    async fn test_arc_blanket_impl() {
        let resolver: Arc<dyn Resolve> = Arc::new(FixedResolver {
            response: vec![IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))],
        });

        let addrs = resolver.resolve(Name::new("example.com")).await.unwrap();
        assert_eq!(addrs, vec![IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))]);
    }
}
