//! Extensible attribute definitions and read-only grid inventory

use serde::{Deserialize, Serialize};

use crate::object::{IbObject, push_filter};

/// Allowed value of a list-typed EA definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaDefListValue {
    pub value: String,
}

/// Extensible attribute definition (`extensibleattributedef`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaDefinition {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// STRING, INTEGER, EMAIL, URL, DATE, ENUM
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub ea_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub flags: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_values: Vec<EaDefListValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_object_types: Vec<String>,
}

impl IbObject for EaDefinition {
    const OBJECT_TYPE: &'static str = "extensibleattributedef";
    const RETURN_FIELDS: &'static [&'static str] =
        &["allowed_object_types", "comment", "flags", "list_values", "name", "type"];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "name", &self.name);
        fields
    }
}

/// Grid member (`member`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    pub host_name: String,
    /// IPV4, IPV6 or BOTH
    pub config_addr_type: String,
    pub platform: String,
    pub service_type_configuration: String,
    pub time_zone: String,
}

impl IbObject for Member {
    const OBJECT_TYPE: &'static str = "member";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "config_addr_type",
        "host_name",
        "platform",
        "service_type_configuration",
        "time_zone",
    ];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "host_name", &self.host_name);
        fields
    }
}

/// Member license (`member:license`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    pub expiration_status: String,
    /// Seconds since the epoch
    pub expiry_date: i64,
    pub hwid: String,
    pub key: String,
    pub kind: String,
    pub limit: String,
    pub limit_context: String,
    #[serde(rename = "type")]
    pub license_type: String,
}

const LICENSE_FIELDS: &[&str] = &[
    "expiration_status",
    "expiry_date",
    "hwid",
    "key",
    "kind",
    "limit",
    "limit_context",
    "type",
];

impl IbObject for License {
    const OBJECT_TYPE: &'static str = "member:license";
    const RETURN_FIELDS: &'static [&'static str] = LICENSE_FIELDS;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "type", &self.license_type);
        fields
    }
}

/// Grid-wide license (`license:gridwide`); same shape as a member license
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridLicense(pub License);

impl IbObject for GridLicense {
    const OBJECT_TYPE: &'static str = "license:gridwide";
    const RETURN_FIELDS: &'static [&'static str] = LICENSE_FIELDS;

    fn reference(&self) -> &str {
        &self.0.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.0.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        self.0.search_fields()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NtpServer {
    pub address: String,
    pub burst: bool,
    pub enable_authentication: bool,
    pub iburst: bool,
    pub preferred: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NtpSetting {
    pub enable_ntp: bool,
    pub ntp_kod: bool,
    pub ntp_servers: Vec<NtpServer>,
}

/// Grid (`grid`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    pub name: String,
    pub ntp_setting: Option<NtpSetting>,
}

impl IbObject for Grid {
    const OBJECT_TYPE: &'static str = "grid";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "ntp_setting"];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "name", &self.name);
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectCount {
    pub count: u64,
    pub type_name: String,
}

/// Per-member object capacity (`capacityreport`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityReport {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    pub name: String,
    pub hardware_type: String,
    pub max_capacity: u64,
    pub object_counts: Vec<ObjectCount>,
    pub percent_used: u64,
    pub role: String,
    pub total_objects: u64,
}

impl IbObject for CapacityReport {
    const OBJECT_TYPE: &'static str = "capacityreport";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "hardware_type",
        "max_capacity",
        "name",
        "object_counts",
        "percent_used",
        "role",
        "total_objects",
    ];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "name", &self.name);
        fields
    }
}

/// Upgrade progress of the grid, a group or a member (`upgradestatus`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeStatus {
    #[serde(rename = "_ref", skip_serializing)]
    pub reference: String,
    /// GRID, GROUP or MEMBER
    #[serde(rename = "type")]
    pub status_type: String,
    pub current_version: String,
    pub upgrade_state: String,
    pub upgrade_group: String,
    pub allowed_actions: Vec<String>,
}

impl IbObject for UpgradeStatus {
    const OBJECT_TYPE: &'static str = "upgradestatus";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "allowed_actions",
        "current_version",
        "type",
        "upgrade_group",
        "upgrade_state",
    ];

    fn reference(&self) -> &str {
        &self.reference
    }

    fn set_reference(&mut self, reference: String) {
        self.reference = reference;
    }

    fn search_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_filter(&mut fields, "type", &self.status_type);
        fields
    }
}
