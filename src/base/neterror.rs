//! Network error taxonomy for the resolution core.
//!
//! Resolution failures are ordinary errors the trace engine can retry or
//! abort on; best-effort derivations (proxy URL parsing) are logged and
//! downgraded by their call sites and never surface here.

use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use thiserror::Error;

use crate::dns::destination::IpFamily;

/// Errors produced by destination resolution and reverse-DNS lookups.
///
/// Sources are stored as `Arc<io::Error>` so the enum stays cheap to clone
/// across the probe workers that share a resolution result.
#[derive(Debug, Clone, Error)]
pub enum NetError {
    /// The DNS back-end failed to produce any answer for a hostname.
    #[error("DNS lookup failed for {domain}")]
    LookupFailed {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// The lookup succeeded but no candidate survived family filtering.
    #[error("no {family} candidate for {host}")]
    NoCandidates { host: String, family: IpFamily },

    /// A PTR lookup for an address failed.
    #[error("reverse DNS lookup failed for {addr}")]
    ReverseLookupFailed {
        addr: IpAddr,
        #[source]
        source: Arc<io::Error>,
    },

    /// A candidate selector returned an index outside the candidate list.
    #[error("candidate index {index} out of range for {len} candidates")]
    SelectionOutOfRange { index: usize, len: usize },
}

impl NetError {
    /// Wraps a resolver failure for `domain`.
    pub fn lookup_failed(domain: &str, err: impl std::fmt::Display) -> Self {
        NetError::LookupFailed {
            domain: domain.to_string(),
            source: Arc::new(io::Error::new(io::ErrorKind::NotFound, err.to_string())),
        }
    }

    /// Wraps a PTR lookup failure for `addr`.
    pub fn reverse_failed(addr: IpAddr, err: impl std::fmt::Display) -> Self {
        NetError::ReverseLookupFailed {
            addr,
            source: Arc::new(io::Error::new(io::ErrorKind::NotFound, err.to_string())),
        }
    }
}
