//! Local host address discovery.
//!
//! # Responsibilities
//! - Snapshot the host's interface addresses at call time
//! - Pick the first non-loopback address with an IPv4 representation
//!
//! # Design Decisions
//! - Interfaces are visited in the order the OS reports them; with several
//!   qualifying interfaces the choice is not stable across hosts
//! - IPv4-mapped IPv6 addresses count as IPv4
//! - Nothing is cached; every call re-enumerates

use std::net::{IpAddr, Ipv4Addr};

use crate::error::MetaError;

/// One configured interface address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddress {
    /// Interface name as reported by the OS (e.g. `eth0`).
    pub name: String,
    pub ip: IpAddr,
    pub loopback: bool,
}

impl HostAddress {
    pub fn new(name: impl Into<String>, ip: IpAddr, loopback: bool) -> Self {
        Self {
            name: name.into(),
            ip,
            loopback,
        }
    }

    /// IPv4 form of this address, if it has one.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped(),
        }
    }
}

impl From<if_addrs::Interface> for HostAddress {
    fn from(iface: if_addrs::Interface) -> Self {
        let loopback = iface.is_loopback();
        let ip = iface.ip();
        Self {
            name: iface.name,
            ip,
            loopback,
        }
    }
}

/// Enumerate all interface addresses on this host.
pub fn host_addresses() -> Result<Vec<HostAddress>, MetaError> {
    let interfaces = if_addrs::get_if_addrs()?;
    Ok(interfaces.into_iter().map(HostAddress::from).collect())
}

/// First non-loopback address with an IPv4 representation.
pub fn select_local_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = HostAddress>,
{
    addrs.into_iter().find_map(|addr| {
        let v4 = addr.ipv4()?;
        if addr.loopback || v4.is_loopback() {
            return None;
        }
        tracing::trace!(interface = %addr.name, ip = %v4, "Selected local address");
        Some(v4)
    })
}

/// Resolve the host's first non-loopback IPv4 address as text.
///
/// Returns an empty string when enumeration fails or nothing qualifies.
pub fn resolve_local_ip() -> String {
    let addrs = match host_addresses() {
        Ok(addrs) => addrs,
        Err(e) => {
            tracing::debug!(error = %e, "Could not enumerate interfaces");
            return String::new();
        }
    };

    match select_local_ipv4(addrs) {
        Some(ip) => ip.to_string(),
        None => {
            tracing::debug!("No non-loopback IPv4 address found");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn addr(name: &str, ip: &str, loopback: bool) -> HostAddress {
        HostAddress::new(name, ip.parse().unwrap(), loopback)
    }

    #[test]
    fn skips_loopback_interface() {
        let addrs = vec![addr("lo", "127.0.0.1", true), addr("eth0", "10.0.0.5", false)];
        assert_eq!(select_local_ipv4(addrs), Some(Ipv4Addr::new(10, 0, 0, 5)));
    }

    #[test]
    fn skips_ipv6_only_addresses() {
        let addrs = vec![
            addr("eth0", "fe80::1", false),
            addr("eth0", "2001:db8::5", false),
            addr("eth1", "192.168.1.20", false),
        ];
        assert_eq!(select_local_ipv4(addrs), Some(Ipv4Addr::new(192, 168, 1, 20)));
    }

    #[test]
    fn first_match_wins() {
        let addrs = vec![addr("eth1", "172.16.0.9", false), addr("eth0", "10.0.0.5", false)];
        assert_eq!(select_local_ipv4(addrs), Some(Ipv4Addr::new(172, 16, 0, 9)));
    }

    #[test]
    fn mapped_ipv6_counts_as_ipv4() {
        let mapped = Ipv4Addr::new(10, 1, 2, 3).to_ipv6_mapped();
        let addrs = vec![HostAddress::new("eth0", IpAddr::V6(mapped), false)];
        assert_eq!(select_local_ipv4(addrs), Some(Ipv4Addr::new(10, 1, 2, 3)));
    }

    #[test]
    fn loopback_address_without_flag_is_skipped() {
        let mapped_loopback = Ipv4Addr::LOCALHOST.to_ipv6_mapped();
        let addrs = vec![
            addr("weird", "127.0.0.2", false),
            HostAddress::new("weird6", IpAddr::V6(mapped_loopback), false),
        ];
        assert_eq!(select_local_ipv4(addrs), None);
    }

    #[test]
    fn nothing_qualifies() {
        let addrs = vec![
            addr("lo", "127.0.0.1", true),
            HostAddress::new("lo", IpAddr::V6(Ipv6Addr::LOCALHOST), true),
        ];
        assert_eq!(select_local_ipv4(addrs), None);
        assert_eq!(select_local_ipv4(Vec::new()), None);
    }

    #[test]
    fn resolve_local_ip_is_empty_or_ipv4() {
        let ip = resolve_local_ip();
        if !ip.is_empty() {
            let parsed: Ipv4Addr = ip.parse().expect("should be an IPv4 address");
            assert!(!parsed.is_loopback());
        }
    }
}
