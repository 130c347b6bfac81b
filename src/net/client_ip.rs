//! Client IP resolution from request metadata.
//!
//! # Responsibilities
//! - Prefer reverse-proxy headers (`X-Real-IP`, then `X-Forwarded-For`)
//! - Fall back to the host part of the transport address
//! - Rewrite the IPv6 loopback literal to `127.0.0.1`
//!
//! # Design Decisions
//! - Header values are trusted as-is and never validated as IP addresses.
//!   Deployments behind untrusted intermediaries must sanitize these headers
//!   upstream, or restrict them with [`ClientIpPolicy::with_trusted_proxies`]
//! - `X-Forwarded-For` is returned whole, including any comma-separated hops
//! - Only an empty header counts as absent; other bytes are kept, with
//!   invalid UTF-8 replaced by U+FFFD

use std::borrow::{Borrow, Cow};
use std::net::IpAddr;

use axum::http::{HeaderMap, HeaderName};

use crate::config::schema::ClientIpConfig;
use crate::net::addr::split_host_port;

pub const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

const IPV6_LOOPBACK: &str = "::1";
const IPV4_LOOPBACK: &str = "127.0.0.1";

/// Resolve the apparent client IP with the default header precedence.
///
/// Never fails; the result is empty only when `remote_addr` is empty and no
/// proxy header is set.
pub fn resolve_client_ip(remote_addr: &str, headers: &HeaderMap) -> String {
    first_header(headers, [&X_REAL_IP, &X_FORWARDED_FOR])
        .map(|value| normalize(&value))
        .unwrap_or_else(|| normalize(transport_host(remote_addr)))
}

/// Configurable variant of [`resolve_client_ip`].
///
/// The default policy behaves exactly like [`resolve_client_ip`].
#[derive(Debug, Clone)]
pub struct ClientIpPolicy {
    trust_headers: bool,
    trusted_proxies: Vec<IpAddr>,
    headers: Vec<HeaderName>,
}

impl Default for ClientIpPolicy {
    fn default() -> Self {
        Self {
            trust_headers: true,
            trusted_proxies: Vec::new(),
            headers: vec![X_REAL_IP, X_FORWARDED_FOR],
        }
    }
}

impl ClientIpPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from validated configuration.
    ///
    /// Header names that fail to parse are dropped with a warning.
    pub fn from_config(config: &ClientIpConfig) -> Self {
        let headers = config
            .headers
            .iter()
            .filter_map(|name| match HeaderName::from_bytes(name.as_bytes()) {
                Ok(header) => Some(header),
                Err(_) => {
                    tracing::warn!(header = %name, "Ignoring invalid client IP header name");
                    None
                }
            })
            .collect();

        Self {
            trust_headers: config.trust_headers,
            trusted_proxies: config.trusted_proxies.clone(),
            headers,
        }
    }

    /// Ignore proxy headers entirely and always use the transport address.
    pub fn without_headers(mut self) -> Self {
        self.trust_headers = false;
        self
    }

    /// Honour proxy headers only when the transport peer is one of `proxies`.
    pub fn with_trusted_proxies(mut self, proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        self.trusted_proxies = proxies.into_iter().collect();
        self
    }

    /// Replace the ordered list of headers consulted before the transport
    /// address.
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = HeaderName>) -> Self {
        self.headers = headers.into_iter().collect();
        self
    }

    pub fn headers(&self) -> &[HeaderName] {
        &self.headers
    }

    pub fn trusted_proxies(&self) -> &[IpAddr] {
        &self.trusted_proxies
    }

    /// Resolve the apparent client IP under this policy.
    pub fn resolve(&self, remote_addr: &str, headers: &HeaderMap) -> String {
        let peer = transport_host(remote_addr);

        if self.honours_headers(peer) {
            if let Some(value) = first_header(headers, &self.headers) {
                return normalize(&value);
            }
        } else if self.trust_headers {
            tracing::trace!(peer = %peer, "Peer is not a trusted proxy; ignoring forwarding headers");
        }

        normalize(peer)
    }

    fn honours_headers(&self, peer: &str) -> bool {
        if !self.trust_headers {
            return false;
        }
        if self.trusted_proxies.is_empty() {
            return true;
        }
        peer.parse::<IpAddr>()
            .map(|ip| self.trusted_proxies.contains(&ip))
            .unwrap_or(false)
    }
}

fn first_header<'a, I>(headers: &'a HeaderMap, names: I) -> Option<Cow<'a, str>>
where
    I: IntoIterator,
    I::Item: Borrow<HeaderName>,
{
    names.into_iter().find_map(|name| {
        headers
            .get(name.borrow())
            .map(|value| value.as_bytes())
            .filter(|bytes| !bytes.is_empty())
            .map(String::from_utf8_lossy)
    })
}

/// Host part of `host:port`, or the raw address when it cannot be split.
fn transport_host(remote_addr: &str) -> &str {
    split_host_port(remote_addr)
        .map(|(host, _)| host)
        .unwrap_or(remote_addr)
}

fn normalize(ip: &str) -> String {
    if ip == IPV6_LOOPBACK {
        IPV4_LOOPBACK.to_string()
    } else {
        ip.to_string()
    }
}
