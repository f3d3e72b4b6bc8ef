//! IPAM objects: network views, networks, network containers, fixed addresses

use serde::{Deserialize, Serialize};

use super::{IpAddressSpec, NetworkSpec};
use crate::ea::Ea;
use crate::match_client::MatchClient;
use crate::object::{IbObject, push_filter};

/// Network view (`networkview`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkView {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Always serialized so an emptied map clears the remote attributes
    #[serde(rename = "extattrs")]
    pub ea: Ea,
}

impl IbObject for NetworkView {
    const OBJECT_TYPE: &'static str = "networkview";
    const RETURN_FIELDS: &'static [&'static str] = &["extattrs", "name"];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn ea(&self) -> Option<&Ea> {
        Some(&self.ea)
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "name", &self.name);
        fields
    }
}

/// Network (`network`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_view: String,
    #[serde(skip_serializing_if = "NetworkSpec::is_empty")]
    pub network: NetworkSpec,
    #[serde(rename = "extattrs", skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl Network {
    /// Literal CIDR, or "" while the network is still a next-available request
    pub fn cidr(&self) -> &str {
        self.network.as_literal().unwrap_or_default()
    }
}

impl IbObject for Network {
    const OBJECT_TYPE: &'static str = "network";
    const RETURN_FIELDS: &'static [&'static str] = &["extattrs", "network", "network_view"];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn ea(&self) -> Option<&Ea> {
        Some(&self.ea)
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "network_view", &self.network_view);
        push_filter(&mut fields, "network", self.cidr());
        fields
    }
}

/// Network container (`networkcontainer`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkContainer {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_view: String,
    #[serde(rename = "network", skip_serializing_if = "String::is_empty")]
    pub cidr: String,
    #[serde(rename = "extattrs", skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl IbObject for NetworkContainer {
    const OBJECT_TYPE: &'static str = "networkcontainer";
    const RETURN_FIELDS: &'static [&'static str] = &["extattrs", "network", "network_view"];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn ea(&self) -> Option<&Ea> {
        Some(&self.ea)
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "network_view", &self.network_view);
        push_filter(&mut fields, "network", &self.cidr);
        fields
    }
}

/// Fixed address reservation (`fixedaddress`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedAddress {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_view: String,
    #[serde(rename = "network", skip_serializing_if = "String::is_empty")]
    pub cidr: String,
    #[serde(skip_serializing_if = "IpAddressSpec::is_empty")]
    pub ipv4addr: IpAddressSpec,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mac: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_client: Option<MatchClient>,
    #[serde(rename = "extattrs", skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl FixedAddress {
    /// Literal IPv4 address, or "" if none is known yet
    pub fn ip_address(&self) -> &str {
        self.ipv4addr.as_literal().unwrap_or_default()
    }
}

impl IbObject for FixedAddress {
    const OBJECT_TYPE: &'static str = "fixedaddress";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "extattrs",
        "ipv4addr",
        "mac",
        "match_client",
        "name",
        "network",
        "network_view",
    ];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn ea(&self) -> Option<&Ea> {
        Some(&self.ea)
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "network_view", &self.network_view);
        push_filter(&mut fields, "network", &self.cidr);
        push_filter(&mut fields, "ipv4addr", self.ip_address());
        push_filter(&mut fields, "mac", &self.mac);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_address_search_skips_empty_fields() {
        let template = FixedAddress {
            network_view: "default".to_string(),
            ipv4addr: IpAddressSpec::from("10.0.0.5"),
            ..Default::default()
        };
        assert_eq!(
            template.search_fields(),
            vec![
                ("network_view", "default".to_string()),
                ("ipv4addr", "10.0.0.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_fixed_address_body_omits_reference_and_empty_fields() {
        let fixed = FixedAddress {
            reference: "fixedaddress/abc:10.0.0.5/default".to_string(),
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
            match_client: Some(MatchClient::MacAddress),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&fixed).unwrap(),
            serde_json::json!({ "mac": "aa:bb:cc:dd:ee:ff", "match_client": "MAC_ADDRESS" })
        );
    }

    #[test]
    fn test_network_decodes_wapi_response() {
        let network: Network = serde_json::from_value(serde_json::json!({
            "_ref": "network/ZG5zLm5ldHdvcmskMTAuMC4wLjAvMjQvMA:10.0.0.0/24/default",
            "network": "10.0.0.0/24",
            "network_view": "default",
            "extattrs": { "Network Name": { "value": "web" } }
        }))
        .unwrap();
        assert_eq!(network.cidr(), "10.0.0.0/24");
        assert_eq!(network.network_view, "default");
        assert!(network.reference.starts_with("network/"));
        assert_eq!(network.ea.len(), 1);
    }

    #[test]
    fn test_network_view_always_sends_extattrs() {
        let view = NetworkView::default();
        assert_eq!(serde_json::to_value(&view).unwrap(), serde_json::json!({ "extattrs": {} }));
    }
}
