//! Local outbound endpoint discovery.
//!
//! Raw probes need to know which local address and port the kernel will
//! route from. Dialing a connectionless socket toward the destination makes
//! the kernel commit to a source endpoint without sending a single packet;
//! reading the socket's local address back reveals the choice, no routing
//! table access required.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::OnceLock;

/// Arbitrary fixed port the probe socket is dialed toward. Nothing is ever
/// sent to it.
const DIAL_PORT: u16 = 12345;

/// The (address, port) pair the OS selected as source endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalEndpoint {
    pub ip: IpAddr,
    pub port: u16,
}

/// Per-family memoized local endpoint resolution.
///
/// The first caller for a family performs the probe; callers racing before
/// it completes block on the cell and then observe the identical outcome,
/// success or failure. With `random_port` set the cells are bypassed so
/// every call binds a fresh source port.
#[derive(Debug, Default)]
pub struct LocalIdentity {
    v4: OnceLock<Option<LocalEndpoint>>,
    v6: OnceLock<Option<LocalEndpoint>>,
    random_port: bool,
}

impl LocalIdentity {
    /// Creates a resolver; `random_port` disables per-family caching.
    pub fn new(random_port: bool) -> Self {
        Self {
            v4: OnceLock::new(),
            v6: OnceLock::new(),
            random_port,
        }
    }

    /// The local endpoint the OS would use to reach `dst`.
    ///
    /// `None` means the probe failed and the caller should let the OS pick
    /// an address at bind time.
    pub fn resolve(&self, dst: IpAddr) -> Option<LocalEndpoint> {
        if self.random_port {
            return probe(dst);
        }

        let cell = match dst {
            IpAddr::V4(_) => &self.v4,
            IpAddr::V6(_) => &self.v6,
        };
        *cell.get_or_init(|| probe(dst))
    }
}

/// Dials a UDP socket toward `dst` and reads back the bound local endpoint.
fn probe(dst: IpAddr) -> Option<LocalEndpoint> {
    let bind_addr: SocketAddr = match dst {
        IpAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        IpAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };

    let socket = match UdpSocket::bind(bind_addr) {
        Ok(socket) => socket,
        Err(e) => {
            tracing::debug!(dst = %dst, error = %e, "probe socket creation failed");
            return None;
        }
    };
    if let Err(e) = socket.connect(SocketAddr::new(dst, DIAL_PORT)) {
        tracing::debug!(dst = %dst, error = %e, "probe dial failed");
        return None;
    }

    match socket.local_addr() {
        Ok(local) => {
            let endpoint = LocalEndpoint {
                ip: local.ip(),
                port: local.port(),
            };
            tracing::debug!(dst = %dst, local = %local, "local endpoint discovered");
            Some(endpoint)
        }
        Err(e) => {
            tracing::debug!(dst = %dst, error = %e, "probe local_addr failed");
            None
        }
    }
}
