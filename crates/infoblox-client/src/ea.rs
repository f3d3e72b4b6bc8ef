//! Extensible attributes
//!
//! Every WAPI object can carry a map of extensible attributes (EAs). This
//! module holds the map type, its wire encoding, and the builder that stamps
//! the client's cloud identity onto objects it creates or updates.
//!
//! On the wire an EA map looks like:
//!
//! ```json
//! { "Tenant ID": { "value": "t-1" }, "Cloud API Owned": { "value": "True" } }
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved: whether the object is owned by the cloud adapter
pub const CLOUD_API_OWNED: &str = "Cloud API Owned";
/// Reserved: cloud management platform type
pub const CMP_TYPE: &str = "CMP Type";
/// Reserved: tenant the object belongs to
pub const TENANT_ID: &str = "Tenant ID";
/// Virtual machine identifier
pub const VM_ID: &str = "VM ID";
/// Virtual machine display name
pub const VM_NAME: &str = "VM Name";
/// Display name attached to networks
pub const NETWORK_NAME: &str = "Network Name";

/// A single extensible attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EaValue {
    String(String),
    Int(i64),
    /// Encoded by WAPI as the strings `"True"` / `"False"`
    Bool(bool),
    /// Multi-value attribute; items are kept exactly as received
    List(Vec<serde_json::Value>),
}

#[derive(Serialize, Deserialize)]
struct WireValue<T> {
    value: T,
}

impl Serialize for EaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EaValue::String(v) => WireValue { value: v.as_str() }.serialize(serializer),
            EaValue::Int(v) => WireValue { value: *v }.serialize(serializer),
            EaValue::Bool(v) => WireValue {
                value: if *v { "True" } else { "False" },
            }
            .serialize(serializer),
            EaValue::List(v) => WireValue { value: v }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for EaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireValue::<serde_json::Value>::deserialize(deserializer)?;
        match wire.value {
            serde_json::Value::String(s) => Ok(match s.as_str() {
                "True" => EaValue::Bool(true),
                "False" => EaValue::Bool(false),
                _ => EaValue::String(s),
            }),
            serde_json::Value::Bool(b) => Ok(EaValue::Bool(b)),
            serde_json::Value::Array(items) => Ok(EaValue::List(items)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(EaValue::Int)
                .ok_or_else(|| D::Error::custom(format!("unsupported EA number: {}", n))),
            other => Err(D::Error::custom(format!("unsupported EA value: {}", other))),
        }
    }
}

impl fmt::Display for EaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EaValue::String(v) => f.write_str(v),
            EaValue::Int(v) => write!(f, "{}", v),
            EaValue::Bool(true) => f.write_str("True"),
            EaValue::Bool(false) => f.write_str("False"),
            EaValue::List(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                f.write_str(&items.join(","))
            }
        }
    }
}

impl From<&str> for EaValue {
    fn from(value: &str) -> Self {
        EaValue::String(value.to_string())
    }
}

impl From<String> for EaValue {
    fn from(value: String) -> Self {
        EaValue::String(value)
    }
}

impl From<i64> for EaValue {
    fn from(value: i64) -> Self {
        EaValue::Int(value)
    }
}

impl From<Vec<&str>> for EaValue {
    fn from(values: Vec<&str>) -> Self {
        EaValue::List(values.into_iter().map(serde_json::Value::from).collect())
    }
}

impl From<bool> for EaValue {
    fn from(value: bool) -> Self {
        EaValue::Bool(value)
    }
}

/// Extensible attribute map, keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ea(BTreeMap<String, EaValue>);

impl Ea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. Last write wins.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<EaValue>) -> Option<EaValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&EaValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<EaValue> {
        self.0.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EaValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<EaValue>> FromIterator<(K, V)> for Ea {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Ea {
    type Item = (String, EaValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, EaValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Cloud identity stamped onto objects created by an object manager
///
/// The identity is fixed for the lifetime of the manager. When
/// `omit_cloud_attrs` is set, no identity attributes are produced at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudIdentity {
    pub cmp_type: String,
    pub tenant_id: String,
    pub omit_cloud_attrs: bool,
}

impl CloudIdentity {
    /// Identity for a cloud adapter. Attributes start out omitted; call
    /// [`CloudIdentity::with_cloud_attrs`] to emit them.
    pub fn new(cmp_type: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            cmp_type: cmp_type.into(),
            tenant_id: tenant_id.into(),
            omit_cloud_attrs: true,
        }
    }

    /// Identity for local management: never emits cloud attributes
    pub fn local() -> Self {
        Self {
            omit_cloud_attrs: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cloud_attrs(mut self, enabled: bool) -> Self {
        self.omit_cloud_attrs = !enabled;
        self
    }

    /// The reserved identity attributes, or an empty map in omit mode
    pub fn basic_ea(&self, cloud_api_owned: bool) -> Ea {
        let mut ea = Ea::new();
        if !self.omit_cloud_attrs {
            ea.insert(CLOUD_API_OWNED, cloud_api_owned);
            ea.insert(CMP_TYPE, self.cmp_type.as_str());
            ea.insert(TENANT_ID, self.tenant_id.as_str());
        }
        ea
    }

    /// [`CloudIdentity::basic_ea`] plus VM ID / VM Name, each only when non-empty
    pub fn basic_vm_ea(&self, cloud_api_owned: bool, vm_id: &str, vm_name: &str) -> Ea {
        let mut ea = self.basic_ea(cloud_api_owned);
        if !self.omit_cloud_attrs {
            if !vm_id.is_empty() {
                ea.insert(VM_ID, vm_id);
            }
            if !vm_name.is_empty() {
                ea.insert(VM_NAME, vm_name);
            }
        }
        ea
    }
}
