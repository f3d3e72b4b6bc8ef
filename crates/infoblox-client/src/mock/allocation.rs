//! Next-available directive resolution for MockConnector
//!
//! Mirrors what the grid does with `func:nextavailableip:` and
//! `func:nextavailablenetwork:` values: the first free address or subnet is
//! picked and written into the stored object.

use std::net::Ipv4Addr;

use super::StoredObject;
use crate::error::InfobloxError;

const NEXT_IP: &str = "func:nextavailableip:";
const NEXT_NETWORK: &str = "func:nextavailablenetwork:";

/// Parse `a.b.c.d/len` into (network base, prefix length)
pub(crate) fn parse_cidr(cidr: &str) -> Option<(u32, u32)> {
    let (addr, len) = cidr.split_once('/')?;
    let addr: Ipv4Addr = addr.parse().ok()?;
    let len: u32 = len.parse().ok()?;
    if len > 32 {
        return None;
    }
    let mask = prefix_mask(len);
    Some((u32::from(addr) & mask, len))
}

fn prefix_mask(len: u32) -> u32 {
    if len == 0 { 0 } else { u32::MAX << (32 - len) }
}

fn contains(cidr: (u32, u32), ip: u32) -> bool {
    ip & prefix_mask(cidr.1) == cidr.0
}

fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    let len = a.1.min(b.1);
    a.0 & prefix_mask(len) == b.0 & prefix_mask(len)
}

/// Every literal IPv4 address held by a stored object
fn used_addresses(objects: &[StoredObject]) -> Vec<u32> {
    let mut used = Vec::new();
    for object in objects {
        let mut push = |value: Option<&serde_json::Value>| {
            if let Some(ip) = value.and_then(|v| v.as_str()).and_then(|s| s.parse::<Ipv4Addr>().ok()) {
                used.push(u32::from(ip));
            }
        };
        push(object.value.get("ipv4addr"));
        if let Some(bindings) = object.value.get("ipv4addrs").and_then(|v| v.as_array()) {
            for binding in bindings {
                push(binding.get("ipv4addr"));
            }
        }
    }
    used
}

/// Resolve `func:nextavailableip:<cidr>,<view>` to the first free host address
fn next_available_ip(directive: &str, objects: &[StoredObject]) -> Result<String, InfobloxError> {
    let args = &directive[NEXT_IP.len()..];
    let cidr_str = args.split(',').next().unwrap_or_default();
    let cidr = parse_cidr(cidr_str)
        .ok_or_else(|| InfobloxError::Api(format!("Invalid network in directive: {}", directive)))?;

    let used = used_addresses(objects);
    let size = 1u64 << (32 - cidr.1);
    // Skip the network and broadcast addresses
    (1..size.saturating_sub(1))
        .map(|offset| cidr.0 + offset as u32)
        .find(|ip| contains(cidr, *ip) && !used.contains(ip))
        .map(|ip| Ipv4Addr::from(ip).to_string())
        .ok_or_else(|| {
            InfobloxError::Api(format!(
                "Cannot find 1 available IP address(es) in this network: {}",
                cidr_str
            ))
        })
}

/// Resolve `func:nextavailablenetwork:<cidr>,<view>,<len>` to the first free subnet
fn next_available_network(directive: &str, objects: &[StoredObject]) -> Result<(String, String), InfobloxError> {
    let invalid = || InfobloxError::Api(format!("Invalid directive: {}", directive));

    let mut args = directive[NEXT_NETWORK.len()..].split(',');
    let parent = args.next().and_then(parse_cidr).ok_or_else(invalid)?;
    let view = args.next().ok_or_else(invalid)?.to_string();
    let len: u32 = args.next().and_then(|l| l.parse().ok()).ok_or_else(invalid)?;
    if len < parent.1 || len > 32 {
        return Err(invalid());
    }

    let taken: Vec<(u32, u32)> = objects
        .iter()
        .filter(|o| o.object_type == "network")
        .filter(|o| o.value.get("network_view").and_then(|v| v.as_str()) == Some(view.as_str()))
        .filter_map(|o| o.value.get("network").and_then(|v| v.as_str()).and_then(parse_cidr))
        .collect();

    let step = 1u64 << (32 - len);
    let count = 1u64 << (len - parent.1);
    (0..count)
        .map(|i| (parent.0 + (i * step) as u32, len))
        .find(|candidate| !taken.iter().any(|t| overlaps(*t, *candidate)))
        .map(|(base, len)| (format!("{}/{}", Ipv4Addr::from(base), len), view.clone()))
        .ok_or_else(|| {
            InfobloxError::Api(format!(
                "Cannot find 1 available network(s) of size /{} in this container",
                len
            ))
        })
}

/// Replace directive values in a create body with concrete values
pub(crate) fn resolve_directives(
    object_type: &str,
    body: &mut serde_json::Value,
    objects: &[StoredObject],
) -> Result<(), InfobloxError> {
    if object_type == "network" {
        if let Some(directive) = body.get("network").and_then(|v| v.as_str()).filter(|s| s.starts_with(NEXT_NETWORK)) {
            let (cidr, view) = next_available_network(directive, objects)?;
            body["network"] = serde_json::Value::String(cidr);
            body["network_view"] = serde_json::Value::String(view);
        }
        return Ok(());
    }

    if let Some(directive) = body.get("ipv4addr").and_then(|v| v.as_str()).filter(|s| s.starts_with(NEXT_IP)) {
        let ip = next_available_ip(directive, objects)?;
        body["ipv4addr"] = serde_json::Value::String(ip);
    }

    if let Some(bindings) = body.get_mut("ipv4addrs").and_then(|v| v.as_array_mut()) {
        for binding in bindings {
            if let Some(directive) = binding.get("ipv4addr").and_then(|v| v.as_str()).filter(|s| s.starts_with(NEXT_IP)) {
                let ip = next_available_ip(directive, objects)?;
                binding["ipv4addr"] = serde_json::Value::String(ip);
            }
        }
    }

    Ok(())
}
