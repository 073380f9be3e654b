//! Destination selection: family filtering and candidate arbitration.
//!
//! A trace needs exactly one destination address. The resolver hands back
//! zero or more candidates; this module narrows them by address family and,
//! when several remain, lets a [`CandidateSelector`] arbitrate. The console
//! implementation blocks on stdin; automated callers inject a deterministic
//! one instead.

use super::providers::resolver_for_token;
use super::{Name, Resolve};
use crate::base::neterror::NetError;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::net::IpAddr;
use std::process;

/// Exit code when an interactively entered candidate index is out of range.
pub const INVALID_SELECTION_EXIT: i32 = 3;

/// Address family constraint for destination resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    V4,
    V6,
    All,
}

impl IpFamily {
    /// Parses the CLI tokens `4`, `6` and `all`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "4" => Some(IpFamily::V4),
            "6" => Some(IpFamily::V6),
            "all" => Some(IpFamily::All),
            _ => None,
        }
    }

    /// True if `ip` satisfies this constraint.
    pub fn matches(self, ip: IpAddr) -> bool {
        match self {
            IpFamily::V4 => ip.is_ipv4(),
            IpFamily::V6 => ip.is_ipv6(),
            IpFamily::All => true,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => f.write_str("IPv4"),
            IpFamily::V6 => f.write_str("IPv6"),
            IpFamily::All => f.write_str("any-family"),
        }
    }
}

/// Applies the family constraint the way the trace engine expects:
/// `V4`/`V6` keep only the first matching candidate, `All` keeps everything.
pub fn filter_candidates(candidates: Vec<IpAddr>, family: IpFamily) -> Vec<IpAddr> {
    match family {
        IpFamily::All => candidates,
        _ => candidates
            .into_iter()
            .find(|ip| family.matches(*ip))
            .into_iter()
            .collect(),
    }
}

/// Arbitrates between multiple resolved candidates.
pub trait CandidateSelector: Send + Sync {
    /// Returns the index of the chosen candidate.
    ///
    /// `candidates` is never empty. An index past the end is reported as
    /// [`NetError::SelectionOutOfRange`] by the caller.
    fn select(&self, host: &str, candidates: &[IpAddr]) -> usize;
}

/// Interactive selector reading an index from standard input.
///
/// Input that does not parse as a number silently falls back to the first
/// candidate, while an explicit out-of-range index terminates the process
/// with [`INVALID_SELECTION_EXIT`]. The asymmetry is long-standing CLI
/// behavior that scripts depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSelector;

impl ConsoleSelector {
    /// Creates a new `ConsoleSelector`.
    pub fn new() -> Self {
        Self
    }
}

impl CandidateSelector for ConsoleSelector {
    fn select(&self, host: &str, candidates: &[IpAddr]) -> usize {
        println!("{host} resolves to multiple addresses, choose the one to trace:");
        for (i, ip) in candidates.iter().enumerate() {
            println!("{i}. {ip}");
        }
        print!("Your option: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        let index: i64 = match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim().parse().unwrap_or(0),
            Err(_) => 0,
        };

        if index < 0 || index as usize >= candidates.len() {
            eprintln!("option {index} is out of range");
            process::exit(INVALID_SELECTION_EXIT);
        }
        index as usize
    }
}

/// Resolves `host` to exactly one destination address.
///
/// A host that already parses as an IP literal skips the DNS round-trip but
/// still passes family filtering. When filtering leaves nothing (the lookup
/// was empty, or the requested family is not served) the result is
/// [`NetError::NoCandidates`]. A single surviving candidate is returned
/// without consulting the selector, as is the first candidate when no
/// selector is supplied.
pub async fn lookup_destination(
    host: &str,
    family: IpFamily,
    resolver: &dyn Resolve,
    selector: Option<&dyn CandidateSelector>,
) -> Result<IpAddr, NetError> {
    let candidates = match host.parse::<IpAddr>() {
        Ok(ip) => vec![ip],
        Err(_) => resolver.resolve(Name::new(host)).await?,
    };

    let candidates = filter_candidates(candidates, family);
    let first = match candidates.first() {
        Some(ip) => *ip,
        None => {
            return Err(NetError::NoCandidates {
                host: host.to_string(),
                family,
            })
        }
    };

    if candidates.len() == 1 {
        return Ok(first);
    }
    let selector = match selector {
        Some(selector) => selector,
        None => return Ok(first),
    };

    tracing::debug!(host, count = candidates.len(), "arbitrating candidates");
    let index = selector.select(host, &candidates);
    match candidates.get(index) {
        Some(ip) => Ok(*ip),
        None => Err(NetError::SelectionOutOfRange {
            index,
            len: candidates.len(),
        }),
    }
}

/// Token-dispatched variant used by the CLI front-end.
///
/// The resolver token is mapped through the provider registry; unmatched
/// tokens query the system resolver. With `interactive` false, multiple
/// candidates collapse to the first without prompting.
pub async fn resolve_destination(
    host: &str,
    family: IpFamily,
    resolver_token: &str,
    interactive: bool,
) -> Result<IpAddr, NetError> {
    let resolver = resolver_for_token(resolver_token);
    let console = ConsoleSelector::new();
    let selector: Option<&dyn CandidateSelector> = if interactive { Some(&console) } else { None };
    lookup_destination(host, family, resolver.as_ref(), selector).await
}
