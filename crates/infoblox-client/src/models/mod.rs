//! WAPI object models
//!
//! These models carry only the fields the object manager reads or writes.
//! See the WAPI reference for the full object schemas.
//!
//! - `ipam.rs` - network views, networks, network containers, fixed addresses
//! - `dns.rs` - host, A, PTR and CNAME records
//! - `grid.rs` - EA definitions and read-only grid inventory

mod dns;
mod grid;
mod ipam;

pub use dns::*;
pub use grid::*;
pub use ipam::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// MAC address used when a fixed address is created without one
pub const MAC_ADDR_ZERO: &str = "00:00:00:00:00:00";

/// IPv4 address to assign: a literal value, or a request for the next free
/// address in a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpAddressSpec {
    Literal(String),
    NextAvailable { cidr: String, network_view: String },
}

impl IpAddressSpec {
    /// Empty `ip` means "next available in `cidr` of `network_view`"
    pub fn from_input(ip: &str, cidr: &str, network_view: &str) -> Self {
        if ip.is_empty() {
            IpAddressSpec::NextAvailable {
                cidr: cidr.to_string(),
                network_view: network_view.to_string(),
            }
        } else {
            IpAddressSpec::Literal(ip.to_string())
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            IpAddressSpec::Literal(ip) => Some(ip),
            IpAddressSpec::NextAvailable { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, IpAddressSpec::Literal(ip) if ip.is_empty())
    }
}

impl Default for IpAddressSpec {
    fn default() -> Self {
        IpAddressSpec::Literal(String::new())
    }
}

impl From<&str> for IpAddressSpec {
    fn from(ip: &str) -> Self {
        IpAddressSpec::Literal(ip.to_string())
    }
}

impl fmt::Display for IpAddressSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddressSpec::Literal(ip) => f.write_str(ip),
            IpAddressSpec::NextAvailable { cidr, network_view } => {
                write!(f, "func:nextavailableip:{},{}", cidr, network_view)
            }
        }
    }
}

impl Serialize for IpAddressSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IpAddressSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(IpAddressSpec::Literal)
    }
}

/// Network CIDR to create: a literal value, or a request for the next free
/// subnet of `prefix_len` inside `parent_cidr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSpec {
    Literal(String),
    NextAvailable {
        parent_cidr: String,
        network_view: String,
        prefix_len: u32,
    },
}

impl NetworkSpec {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            NetworkSpec::Literal(cidr) => Some(cidr),
            NetworkSpec::NextAvailable { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NetworkSpec::Literal(cidr) if cidr.is_empty())
    }
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec::Literal(String::new())
    }
}

impl From<&str> for NetworkSpec {
    fn from(cidr: &str) -> Self {
        NetworkSpec::Literal(cidr.to_string())
    }
}

impl fmt::Display for NetworkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkSpec::Literal(cidr) => f.write_str(cidr),
            NetworkSpec::NextAvailable {
                parent_cidr,
                network_view,
                prefix_len,
            } => write!(
                f,
                "func:nextavailablenetwork:{},{},{}",
                parent_cidr, network_view, prefix_len
            ),
        }
    }
}

impl Serialize for NetworkSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(NetworkSpec::Literal)
    }
}
