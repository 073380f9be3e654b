//! Address redaction and small membership helpers shared with the output
//! layer.

use std::net::{IpAddr, Ipv6Addr};

/// Masks an IP address string down to its routing prefix for display.
///
/// IPv4 addresses keep their first 16 bits (`192.168.1.23` becomes
/// `192.168.0.0/16`), IPv6 addresses their first 32 bits (`2001:db8::1`
/// becomes `2001:db8::/32`). Input that does not parse as an address yields
/// an empty string so callers can tell redaction was not possible.
pub fn mask_ip(ip: &str) -> String {
    let parsed: IpAddr = match ip.parse() {
        Ok(addr) => addr,
        Err(_) => return String::new(),
    };

    match parsed {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            format!("{}.{}.0.0/16", octets[0], octets[1])
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            let masked = Ipv6Addr::new(segments[0], segments[1], 0, 0, 0, 0, 0, 0);
            format!("{masked}/32")
        }
    }
}

/// Returns true if `value` matches any entry in `list`.
pub fn contains_token<S: AsRef<str>>(list: &[S], value: &str) -> bool {
    list.iter().any(|entry| entry.as_ref() == value)
}
