//! DNS records: host, A, PTR and CNAME

use serde::{Deserialize, Serialize};

use super::IpAddressSpec;
use crate::ea::Ea;
use crate::object::{IbObject, push_filter};

/// One IPv4 binding of a host record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRecordIpv4Addr {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "IpAddressSpec::is_empty")]
    pub ipv4addr: IpAddressSpec,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mac: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configure_for_dhcp: Option<bool>,
}

impl HostRecordIpv4Addr {
    pub fn ip_address(&self) -> &str {
        self.ipv4addr.as_literal().unwrap_or_default()
    }
}

/// Host record (`record:host`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRecord {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// DNS view
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_view: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(rename = "configure_for_dns", skip_serializing_if = "Option::is_none")]
    pub enable_dns: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv4addrs: Vec<HostRecordIpv4Addr>,
    #[serde(rename = "extattrs", skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl IbObject for HostRecord {
    const OBJECT_TYPE: &'static str = "record:host";
    const RETURN_FIELDS: &'static [&'static str] =
        &["configure_for_dns", "extattrs", "ipv4addrs", "name", "network_view", "view", "zone"];

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
        push_filter(&mut fields, "view", &self.view);
        push_filter(&mut fields, "network_view", &self.network_view);
        fields
    }
}

/// A record (`record:a`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordA {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(skip_serializing_if = "IpAddressSpec::is_empty")]
    pub ipv4addr: IpAddressSpec,
    #[serde(rename = "extattrs", skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl IbObject for RecordA {
    const OBJECT_TYPE: &'static str = "record:a";
    const RETURN_FIELDS: &'static [&'static str] = &["extattrs", "ipv4addr", "name", "view", "zone"];

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
        push_filter(&mut fields, "view", &self.view);
        push_filter(&mut fields, "ipv4addr", self.ipv4addr.as_literal().unwrap_or_default());
        fields
    }
}

/// PTR record (`record:ptr`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordPtr {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ptrdname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(skip_serializing_if = "IpAddressSpec::is_empty")]
    pub ipv4addr: IpAddressSpec,
    #[serde(rename = "extattrs", skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl IbObject for RecordPtr {
    const OBJECT_TYPE: &'static str = "record:ptr";
    const RETURN_FIELDS: &'static [&'static str] = &["extattrs", "ipv4addr", "ptrdname", "view", "zone"];

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
        push_filter(&mut fields, "ptrdname", &self.ptrdname);
        push_filter(&mut fields, "view", &self.view);
        push_filter(&mut fields, "ipv4addr", self.ipv4addr.as_literal().unwrap_or_default());
        fields
    }
}

/// CNAME record (`record:cname`). Aliases never carry extensible attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordCname {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub canonical: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zone: String,
}

impl IbObject for RecordCname {
    const OBJECT_TYPE: &'static str = "record:cname";
    const RETURN_FIELDS: &'static [&'static str] = &["canonical", "name", "view", "zone"];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "name", &self.name);
        push_filter(&mut fields, "canonical", &self.canonical);
        push_filter(&mut fields, "view", &self.view);
        fields
    }
}
