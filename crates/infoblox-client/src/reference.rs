//! Object reference decoding
//!
//! WAPI embeds identifying information inside object references, e.g.
//!
//! ```text
//! networkview/ZG5zLm5ldHdvcmtfdmlldyQyMw:global_view/false
//! network/ZG5zLm5ldHdvcmskODkuMC4wLjAvMjQvMjU:89.0.0.0/24/global_view
//! fixedaddress/ZG5zLmJpbmRfY25h:12.0.10.1/external
//! ```
//!
//! Decoding a reference saves a read after operations that only return one,
//! such as next-available allocation. References are only ever parsed here,
//! never built. A reference of an unexpected shape is not an error: the
//! decoders return `None` (or an empty string) and the caller decides.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Network, NetworkSpec, NetworkView};

static NETWORK_VIEW_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"networkview/(?-u:\w)+:([^/]+)/(?-u:\w)+").expect("Invalid regex pattern")
});

// The view capture runs to the end of the string: legacy view names may contain '/'.
static NETWORK_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"network/(?-u:\w)+:([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+/[0-9]+)/(.+)")
        .expect("Invalid regex pattern")
});

static FIXED_ADDRESS_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"fixedaddress/(?-u:\w)+:([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)/.+")
        .expect("Invalid regex pattern")
});

/// Decode the view name from a `networkview/...` reference
pub fn network_view_from_ref(reference: &str) -> Option<NetworkView> {
    let caps = NETWORK_VIEW_REF_RE.captures(reference)?;
    Some(NetworkView {
        reference: reference.to_string(),
        name: caps[1].to_string(),
        ..Default::default()
    })
}

/// Decode the CIDR and network view from a `network/...` reference
pub fn network_from_ref(reference: &str) -> Option<Network> {
    let caps = NETWORK_REF_RE.captures(reference)?;
    Some(Network {
        reference: reference.to_string(),
        network_view: caps[2].to_string(),
        network: NetworkSpec::Literal(caps[1].to_string()),
        ..Default::default()
    })
}

/// IPv4 address embedded in a `fixedaddress/...` reference, or "" if the
/// reference has another shape
pub fn ip_address_from_ref(reference: &str) -> String {
    FIXED_ADDRESS_REF_RE
        .captures(reference)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}
