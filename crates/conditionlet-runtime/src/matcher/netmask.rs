//! CIDR containment

use crate::error::MatchError;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Which networks the `netmask` comparison accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetmaskPolicy {
    /// Accept IPv6 networks (`2001:db8::/32`)
    pub allow_ipv6: bool,
}

impl Default for NetmaskPolicy {
    fn default() -> Self {
        Self { allow_ipv6: true }
    }
}

/// Parse `network/prefix`
///
/// A bare address without a prefix length is malformed.
pub fn parse_network(value: &str, policy: &NetmaskPolicy) -> Result<IpNet, MatchError> {
    let value = value.trim();
    let network: IpNet = value.parse().map_err(|source| MatchError::MalformedNetwork {
        value: value.to_string(),
        source,
    })?;

    if matches!(network, IpNet::V6(_)) && !policy.allow_ipv6 {
        return Err(MatchError::Ipv6Disabled(value.to_string()));
    }

    Ok(network)
}

/// Test whether `ip` lies inside the network described by `value`
///
/// The address and the network base are both masked with the prefix and
/// compared as integers. Mixed address families never match.
pub fn matches_netmask(ip: IpAddr, value: &str, policy: &NetmaskPolicy) -> Result<bool, MatchError> {
    let network = parse_network(value, policy)?;

    let contained = match (network, ip) {
        (IpNet::V4(net), IpAddr::V4(addr)) => {
            let mask = u32::from(net.netmask());
            u32::from(addr) & mask == u32::from(net.addr()) & mask
        }
        (IpNet::V6(net), IpAddr::V6(addr)) => {
            let mask = u128::from(net.netmask());
            u128::from(addr) & mask == u128::from(net.addr()) & mask
        }
        _ => false,
    };

    Ok(contained)
}
