//! Client IP resolution from forwarding headers

use super::http::Headers;
use conditionlet_core::ContextError;
use std::net::{IpAddr, SocketAddr};

/// Headers consulted for the originating client address, in order
pub const DEFAULT_IP_HEADERS: &[&str] = &[
    "X-Forwarded-For",
    "X-Real-IP",
    "Proxy-Client-IP",
    "WL-Proxy-Client-IP",
    "HTTP_CLIENT_IP",
    "HTTP_X_FORWARDED_FOR",
];

/// Resolves the address of the client that issued a request
///
/// The first configured header carrying a usable value wins. Proxy chains
/// (`client, proxy1, proxy2`) contribute their left-most entry. When no
/// header yields an address, the connection's peer address is used.
#[derive(Debug, Clone)]
pub struct ClientIpResolver {
    headers: Vec<String>,
}

impl ClientIpResolver {
    /// Create a resolver consulting the given headers in order
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    /// Headers consulted, in order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Resolve the client address
    pub fn resolve(&self, headers: &Headers, peer: Option<IpAddr>) -> Result<IpAddr, ContextError> {
        let mut rejected = None;

        for name in &self.headers {
            let Some(raw) = headers.get(name) else {
                continue;
            };
            let Some(entry) = first_entry(raw) else {
                continue;
            };
            match parse_address(entry) {
                Some(ip) => return Ok(canonical_ip(ip)),
                None => {
                    tracing::debug!(header = %name, value = %entry, "Ignoring unparseable forwarded address");
                    rejected.get_or_insert_with(|| ContextError::InvalidAddress {
                        source_name: name.clone(),
                        value: entry.to_string(),
                    });
                }
            }
        }

        if let Some(ip) = peer {
            return Ok(canonical_ip(ip));
        }

        Err(rejected.unwrap_or_else(|| {
            ContextError::Unresolvable("no forwarding header and no peer address".to_string())
        }))
    }
}

impl Default for ClientIpResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IP_HEADERS.iter().copied())
    }
}

/// Left-most non-empty entry, skipping the `unknown` placeholder proxies emit
fn first_entry(raw: &str) -> Option<&str> {
    let entry = raw.split(',').next()?.trim();
    if entry.is_empty() || entry.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(entry)
    }
}

/// Accepts `1.2.3.4`, `1.2.3.4:8080`, `::1`, `[::1]` and `[::1]:8080`
fn parse_address(entry: &str) -> Option<IpAddr> {
    if let Ok(ip) = entry.parse::<IpAddr>() {
        return Some(ip);
    }
    if let Ok(addr) = entry.parse::<SocketAddr>() {
        return Some(addr.ip());
    }
    entry
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .and_then(|s| s.parse::<IpAddr>().ok())
}

/// IPv4-mapped IPv6 addresses are reported as plain IPv4
pub fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        IpAddr::V4(_) => ip,
    }
}
