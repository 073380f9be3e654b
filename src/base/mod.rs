//! Base types and error handling.
//!
//! Provides the foundational pieces the resolution modules build on:
//! - [`NetError`](neterror::NetError): error taxonomy for lookups
//! - [`mask_ip`](redact::mask_ip): destination-address redaction

pub mod neterror;
pub mod redact;
