//! DNS Resolution Module
//!
//! Provides pluggable DNS resolution for the trace engine:
//! - Named DoH providers selected by token, with a system UDP default
//! - Destination resolution with family filtering and candidate arbitration
//! - A memoizing reverse-DNS cache
//!
//! # Architecture
//!
//! The [`Resolve`] trait is the core abstraction that allows resolver
//! back-ends to be swapped per call; [`resolver_for_token`] maps the CLI
//! token to a concrete instance. Reverse lookups go through the parallel
//! [`ReverseResolve`] trait so the cache can be tested against fakes.
//!
//! # Example
//!
//! ```rust,ignore
//! use tracenet::dns::{resolve_destination, IpFamily};
//!
//! let ip = resolve_destination("example.com", IpFamily::V4, "cloudflare", true).await?;
//! println!("tracing {ip}");
//! ```

pub mod destination;
pub mod providers;
pub mod rdns;
mod resolve;

pub use destination::{
    lookup_destination, resolve_destination, CandidateSelector, ConsoleSelector, IpFamily,
    INVALID_SELECTION_EXIT,
};
pub use providers::{provider_for_token, resolver_for_token, DohResolver, SystemResolver};
pub use rdns::{RdnsCache, ReverseResolve, ReverseResolving, SystemReverseResolver};
pub use resolve::{Candidates, Name, Resolve, Resolving};
