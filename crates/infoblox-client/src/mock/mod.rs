//! Mock connector for unit testing
//!
//! This module provides an in-memory implementation of [`IbConnector`] that
//! can be used in tests without a running grid. It stores objects as JSON,
//! hands out references in the same textual shapes WAPI uses, resolves
//! next-available directives, and records every call so tests can assert on
//! what was (or was not) sent.
//!
//! - `allocation.rs` - next-available IP and network resolution

mod allocation;

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::connector::{IbConnector, ObjectQuery};
use crate::error::InfobloxError;

/// A call received by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorCall {
    Create {
        object_type: String,
        body: serde_json::Value,
    },
    Get {
        object_type: String,
        reference: Option<String>,
        query: ObjectQuery,
    },
    Update {
        reference: String,
        body: serde_json::Value,
    },
    Delete {
        reference: String,
    },
    Multi {
        requests: serde_json::Value,
    },
}

/// Connector operation, for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Create,
    Get,
    Update,
    Delete,
    Multi,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredObject {
    pub(crate) reference: String,
    pub(crate) object_type: String,
    pub(crate) value: serde_json::Value,
}

/// Mock connector for testing
///
/// Clones share the same store, so a test can keep one handle for
/// assertions and give another to the object manager.
#[derive(Debug, Clone)]
pub struct MockConnector {
    pub(crate) objects: Arc<Mutex<Vec<StoredObject>>>,
    pub(crate) calls: Arc<Mutex<Vec<ConnectorCall>>>,
    pub(crate) failing: Arc<Mutex<HashSet<MockOperation>>>,
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create a new, empty mock connector
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Store an object directly (for test setup); returns its reference.
    /// Not recorded as a call.
    pub fn add_object(&self, object_type: &str, mut value: serde_json::Value) -> String {
        let reference = self.make_reference(object_type, &mut value);
        self.objects.lock().unwrap().push(StoredObject {
            reference: reference.clone(),
            object_type: object_type.to_string(),
            value,
        });
        reference
    }

    /// Stored JSON for a reference
    pub fn object(&self, reference: &str) -> Option<serde_json::Value> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.reference == reference)
            .map(|o| o.value.clone())
    }

    /// References of every stored object of a type, in creation order
    pub fn references(&self, object_type: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.object_type == object_type)
            .map(|o| o.reference.clone())
            .collect()
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<ConnectorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received for an operation
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| {
                matches!(
                    (operation, call),
                    (MockOperation::Create, ConnectorCall::Create { .. })
                        | (MockOperation::Get, ConnectorCall::Get { .. })
                        | (MockOperation::Update, ConnectorCall::Update { .. })
                        | (MockOperation::Delete, ConnectorCall::Delete { .. })
                        | (MockOperation::Multi, ConnectorCall::Multi { .. })
                )
            })
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make every subsequent call of `operation` fail with an API error
    pub fn fail_operation(&self, operation: MockOperation) {
        self.failing.lock().unwrap().insert(operation);
    }

    fn check_failure(&self, operation: MockOperation) -> Result<(), InfobloxError> {
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(InfobloxError::Api(format!("{:?} failed: injected failure", operation)));
        }
        Ok(())
    }

    fn record(&self, call: ConnectorCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Generate next ID
    fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    /// Build a reference shaped like the grid's: `<type>/<opaque>:<identity>`
    fn make_reference(&self, object_type: &str, value: &mut serde_json::Value) -> String {
        let id = self.next_id();
        let opaque = STANDARD_NO_PAD
            .encode(format!("dns.{}${}", object_type.replace(':', "_"), id))
            .replace(|c: char| !c.is_ascii_alphanumeric(), "");

        let field = |name: &str| value.get(name).and_then(|v| v.as_str()).unwrap_or_default().to_string();

        if matches!(object_type, "network" | "networkcontainer" | "fixedaddress") && field("network_view").is_empty() {
            value["network_view"] = serde_json::Value::String("default".to_string());
        }
        let field = |name: &str| value.get(name).and_then(|v| v.as_str()).unwrap_or_default().to_string();

        let identity = match object_type {
            "networkview" => format!("{}/false", field("name")),
            "network" | "networkcontainer" => format!("{}/{}", field("network"), field("network_view")),
            "fixedaddress" => format!("{}/{}", field("ipv4addr"), field("network_view")),
            "record:host" | "record:a" | "record:cname" => format!("{}/{}", field("name"), field("view")),
            "record:ptr" => format!("{}/{}", field("ptrdname"), field("view")),
            "extensibleattributedef" => field("name"),
            _ => id.to_string(),
        };

        let reference = format!("{}/{}:{}", object_type, opaque, identity);
        value["_ref"] = serde_json::Value::String(reference.clone());
        reference
    }

    /// Reject objects the grid would consider duplicates
    fn check_duplicate(&self, object_type: &str, body: &serde_json::Value) -> Result<(), InfobloxError> {
        let key_fields: &[&str] = match object_type {
            "networkview" | "extensibleattributedef" => &["name"],
            "network" | "networkcontainer" => &["network", "network_view"],
            _ => return Ok(()),
        };

        let objects = self.objects.lock().unwrap();
        let duplicate = objects.iter().any(|o| {
            o.object_type == object_type
                && key_fields.iter().all(|f| {
                    let stored = o.value.get(*f).and_then(|v| v.as_str()).unwrap_or("default");
                    let wanted = body.get(*f).and_then(|v| v.as_str()).unwrap_or("default");
                    stored == wanted
                })
        });

        if duplicate {
            return Err(InfobloxError::Api(format!(
                "AdmConDataError: {} already exists: {}",
                object_type, body
            )));
        }
        Ok(())
    }

    fn store_created(&self, object_type: &str, body: serde_json::Value) -> Result<String, InfobloxError> {
        let mut value = body;
        {
            let objects = self.objects.lock().unwrap();
            allocation::resolve_directives(object_type, &mut value, &objects)?;
        }
        self.check_duplicate(object_type, &value)?;

        Ok(self.add_object(object_type, value))
    }

    fn apply_update(&self, reference: &str, body: &serde_json::Value) -> Result<String, InfobloxError> {
        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .iter_mut()
            .find(|o| o.reference == reference)
            .ok_or_else(|| InfobloxError::NotFound(format!("Object not found: {}", reference)))?;

        // PUT replaces each supplied field wholesale, extattrs included
        if let (Some(target), Some(fields)) = (stored.value.as_object_mut(), body.as_object()) {
            for (key, field) in fields {
                if key != "_ref" {
                    target.insert(key.clone(), field.clone());
                }
            }
        }
        Ok(stored.reference.clone())
    }

    fn remove_object(&self, reference: &str) -> Result<String, InfobloxError> {
        let mut objects = self.objects.lock().unwrap();
        let position = objects
            .iter()
            .position(|o| o.reference == reference)
            .ok_or_else(|| InfobloxError::NotFound(format!("Object not found: {}", reference)))?;
        objects.remove(position);
        Ok(reference.to_string())
    }
}

/// Keep only `_ref` and the requested fields
fn project(value: &serde_json::Value, return_fields: &[String]) -> serde_json::Value {
    if return_fields.is_empty() {
        return value.clone();
    }
    let mut projected = serde_json::Map::new();
    if let Some(object) = value.as_object() {
        for (key, field) in object {
            if key == "_ref" || return_fields.iter().any(|f| f == key) {
                projected.insert(key.clone(), field.clone());
            }
        }
    }
    serde_json::Value::Object(projected)
}

fn matches_query(value: &serde_json::Value, query: &ObjectQuery) -> bool {
    let fields_match = query.filters.iter().all(|(key, wanted)| match value.get(key) {
        Some(serde_json::Value::String(s)) => s == wanted,
        Some(other) => other.to_string() == *wanted,
        None => false,
    });

    let ea_match = query.ea_search.iter().all(|(name, wanted)| {
        let wanted = serde_json::to_value(wanted).ok();
        let stored = value.get("extattrs").and_then(|ea| ea.get(name));
        matches!((stored, wanted), (Some(s), Some(w)) if s.get("value") == w.get("value"))
    });

    fields_match && ea_match
}

#[async_trait::async_trait]
impl IbConnector for MockConnector {
    async fn create_object(&self, object_type: &str, body: serde_json::Value) -> Result<String, InfobloxError> {
        self.record(ConnectorCall::Create {
            object_type: object_type.to_string(),
            body: body.clone(),
        });
        self.check_failure(MockOperation::Create)?;

        self.store_created(object_type, body)
    }

    async fn get_object(
        &self,
        object_type: &str,
        reference: Option<&str>,
        query: &ObjectQuery,
    ) -> Result<serde_json::Value, InfobloxError> {
        self.record(ConnectorCall::Get {
            object_type: object_type.to_string(),
            reference: reference.map(str::to_string),
            query: query.clone(),
        });
        self.check_failure(MockOperation::Get)?;

        let objects = self.objects.lock().unwrap();
        match reference {
            Some(reference) => objects
                .iter()
                .find(|o| o.reference == reference)
                .map(|o| project(&o.value, &query.return_fields))
                .ok_or_else(|| InfobloxError::NotFound(format!("Object not found: {}", reference))),
            None => Ok(serde_json::Value::Array(
                objects
                    .iter()
                    .filter(|o| o.object_type == object_type && matches_query(&o.value, query))
                    .map(|o| project(&o.value, &query.return_fields))
                    .collect(),
            )),
        }
    }

    async fn update_object(&self, reference: &str, body: serde_json::Value) -> Result<String, InfobloxError> {
        self.record(ConnectorCall::Update {
            reference: reference.to_string(),
            body: body.clone(),
        });
        self.check_failure(MockOperation::Update)?;

        self.apply_update(reference, &body)
    }

    async fn delete_object(&self, reference: &str) -> Result<String, InfobloxError> {
        self.record(ConnectorCall::Delete {
            reference: reference.to_string(),
        });
        self.check_failure(MockOperation::Delete)?;

        self.remove_object(reference)
    }

    async fn create_multi_object(&self, requests: serde_json::Value) -> Result<serde_json::Value, InfobloxError> {
        self.record(ConnectorCall::Multi {
            requests: requests.clone(),
        });
        self.check_failure(MockOperation::Multi)?;

        let entries = requests
            .as_array()
            .ok_or_else(|| InfobloxError::Api("multi-object request body must be an array".to_string()))?;

        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let method = entry.get("method").and_then(|v| v.as_str()).unwrap_or_default();
            let object = entry.get("object").and_then(|v| v.as_str()).unwrap_or_default();
            let data = entry.get("data").cloned().unwrap_or_else(|| serde_json::json!({}));

            let reference = match method {
                "POST" => self.store_created(object, data)?,
                "PUT" => self.apply_update(object, &data)?,
                "DELETE" => self.remove_object(object)?,
                _ => {
                    return Err(InfobloxError::Api(format!(
                        "unsupported method in multi-object request: {:?}",
                        method
                    )));
                }
            };
            results.push(serde_json::json!({ "_ref": reference }));
        }
        Ok(serde_json::Value::Array(results))
    }
}
