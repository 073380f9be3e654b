//! # tracenet
//!
//! Network-identity resolution core for a command-line traceroute utility.
//!
//! `tracenet` answers the questions a trace engine has to settle before the
//! first probe leaves the machine: which local address and port the kernel
//! will route from, which IP a target hostname should resolve to, what the
//! routers along the path are called, and which endpoint, proxy and provider
//! parameters the environment dictates.
//!
//! ## Features
//!
//! - **Local identity**: outbound endpoint discovery via a connectionless
//!   dial probe, memoized per address family with single-flight semantics
//! - **Pluggable DNS**: five named DoH providers plus a system UDP default,
//!   selected per call by token
//! - **Destination resolution**: family filtering and interactive candidate
//!   arbitration behind an injectable selector
//! - **Reverse-DNS cache**: concurrent, never-evicting PTR memoization
//! - **Environment config**: endpoint, proxy and proof-of-work derivation
//!   with an optional debug echo of every read
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tracenet::context::NetContext;
//! use tracenet::dns::IpFamily;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = NetContext::from_env();
//!     let dst = ctx
//!         .resolve_destination("example.com", IpFamily::V4, "cloudflare", true)
//!         .await
//!         .unwrap();
//!     let local = ctx.local_endpoint(dst);
//!     println!("tracing {dst} from {local:?}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and redaction helpers
//! - [`config`] - Environment access and derived parameters
//! - [`context`] - Session-owned aggregation of the caches below
//! - [`dns`] - Resolver back-ends, destination resolution, reverse-DNS cache
//! - [`identity`] - Local outbound endpoint discovery
//!
//! The probe engine, console formatting and CLI parsing live in their own
//! crates and consume this one through [`context::NetContext`].

pub mod base;
pub mod config;
pub mod context;
pub mod dns;
pub mod identity;
