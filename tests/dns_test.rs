//! DNS Module Tests
//!
//! Covers:
//! - `Name` struct
//! - Provider token registry
//! - Destination resolution with a mock `Resolve`
//! - Candidate arbitration through `CandidateSelector`

use tracenet::base::neterror::NetError;
use tracenet::dns::{
    lookup_destination, provider_for_token, CandidateSelector, Candidates, IpFamily, Name,
    Resolve, Resolving,
};

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};

struct MockResolver {
    response: Candidates,
    calls: AtomicUsize,
}

impl MockResolver {
    fn returning(response: Candidates) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Resolve for MockResolver {
    fn resolve(&self, _name: Name) -> Resolving {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let addrs = self.response.clone();
        Box::pin(async move { Ok(addrs) })
    }
}

struct RecordingSelector {
    consulted: AtomicUsize,
    answer: usize,
}

impl CandidateSelector for RecordingSelector {
    fn select(&self, _host: &str, _candidates: &[IpAddr]) -> usize {
        self.consulted.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

fn v4(d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 0, 2, d))
}

fn v6(last: u16) -> IpAddr {
    IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, last))
}

#[test]
fn test_name_api() {
    let name = Name::new("example.com");
    assert_eq!(name.as_str(), "example.com");
    assert_eq!(name.to_string(), "example.com");
}

#[test]
fn test_registry_tokens() {
    for token in ["dnssb", "aliyun", "dnspod", "google", "cloudflare"] {
        let provider = provider_for_token(token)
            .unwrap_or_else(|| panic!("token {token} should have a provider"));
        assert_eq!(provider.token(), token);
        assert!(!provider.endpoint_host().is_empty());
    }
    assert!(provider_for_token("something-else").is_none());
}

#[tokio::test]
async fn test_unambiguous_resolution_never_prompts() {
    let resolver = MockResolver::returning(vec![v4(1)]);
    let selector = RecordingSelector {
        consulted: AtomicUsize::new(0),
        answer: 0,
    };

    let ip = lookup_destination("one.example.com", IpFamily::V4, &resolver, Some(&selector))
        .await
        .unwrap();

    assert_eq!(ip, v4(1));
    assert_eq!(selector.consulted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ambiguous_resolution_prompts_once() {
    let resolver = MockResolver::returning(vec![v4(1), v4(2), v4(3)]);
    let selector = RecordingSelector {
        consulted: AtomicUsize::new(0),
        answer: 1,
    };

    let ip = lookup_destination("many.example.com", IpFamily::All, &resolver, Some(&selector))
        .await
        .unwrap();

    assert_eq!(ip, v4(2));
    assert_eq!(selector.consulted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_family_filter_end_to_end() {
    let resolver = MockResolver::returning(vec![v6(1), v4(1), v6(2), v4(2)]);

    // V4 narrows to the first IPv4 candidate; no arbitration needed.
    let ip = lookup_destination("dual.example.com", IpFamily::V4, &resolver, None)
        .await
        .unwrap();
    assert_eq!(ip, v4(1));

    let ip = lookup_destination("dual.example.com", IpFamily::V6, &resolver, None)
        .await
        .unwrap();
    assert_eq!(ip, v6(1));
}

#[tokio::test]
async fn test_missing_family_is_reported() {
    let resolver = MockResolver::returning(vec![v4(1), v4(2)]);

    let err = lookup_destination("v4only.example.com", IpFamily::V6, &resolver, None)
        .await
        .unwrap_err();

    match err {
        NetError::NoCandidates { host, family } => {
            assert_eq!(host, "v4only.example.com");
            assert_eq!(family, IpFamily::V6);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_resolver_consulted_once_per_resolution() {
    let resolver = MockResolver::returning(vec![v4(1), v4(2)]);

    lookup_destination("example.com", IpFamily::All, &resolver, None)
        .await
        .unwrap();
    lookup_destination("example.com", IpFamily::All, &resolver, None)
        .await
        .unwrap();

    // Destination resolution carries no cache of its own; the resolver
    // back-end owns that policy.
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
}
