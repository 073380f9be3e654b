//! Reverse-DNS Cache Tests
//!
//! Covers:
//! - Cache hit/miss behavior against an instrumented resolver
//! - First-name-only memoization
//! - Failure passthrough without caching
//! - Concurrent lookups from multiple workers

use tracenet::base::neterror::NetError;
use tracenet::dns::{RdnsCache, ReverseResolve, ReverseResolving};

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingReverse {
    names: Vec<String>,
    fail: bool,
    calls: AtomicUsize,
}

impl CountingReverse {
    fn returning(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            names: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

impl ReverseResolve for CountingReverse {
    fn reverse(&self, addr: IpAddr) -> ReverseResolving {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let names = self.names.clone();
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                return Err(NetError::reverse_failed(addr, "synthetic failure"));
            }
            Ok(names)
        })
    }
}

fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_cache_prevents_repeat_lookups() {
    let resolver = CountingReverse::returning(&["core1.provider.example."]);
    let cache = RdnsCache::with_resolver(resolver.clone());

    for _ in 0..5 {
        let names = cache.lookup(addr("203.0.113.1")).await.unwrap();
        assert_eq!(names, vec!["core1.provider.example."]);
    }
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_multi_name_answers_collapse_on_hit() {
    let resolver = CountingReverse::returning(&["first.example.", "second.example."]);
    let cache = RdnsCache::with_resolver(resolver.clone());

    let miss = cache.lookup(addr("203.0.113.2")).await.unwrap();
    assert_eq!(miss.len(), 2);

    let hit = cache.lookup(addr("203.0.113.2")).await.unwrap();
    assert_eq!(hit, vec!["first.example."]);
}

#[tokio::test]
async fn test_failures_are_retried() {
    let resolver = CountingReverse::failing();
    let cache = RdnsCache::with_resolver(resolver.clone());

    assert!(cache.lookup(addr("203.0.113.3")).await.is_err());
    assert!(cache.lookup(addr("203.0.113.3")).await.is_err());
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_concurrent_workers_share_the_cache() {
    let resolver = CountingReverse::returning(&["hop.example."]);
    let cache = Arc::new(RdnsCache::with_resolver(resolver.clone()));

    // Warm the entry, then hammer it from many tasks like probe workers do.
    cache.lookup(addr("203.0.113.4")).await.unwrap();

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.lookup(addr("203.0.113.4")).await.unwrap() })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), vec!["hop.example."]);
    }
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
}
