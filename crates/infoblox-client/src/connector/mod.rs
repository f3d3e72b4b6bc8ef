//! Connector boundary
//!
//! The object manager never talks HTTP itself. It hands JSON bodies and
//! search queries to an [`IbConnector`], which owns transport, auth,
//! timeouts and response decoding. [`WapiConnector`] is the HTTP
//! implementation; tests use the in-memory mock.

mod wapi;

pub use wapi::WapiConnector;

use crate::ea::Ea;
use crate::error::InfobloxError;
use crate::object::IbObject;

/// Search filters and projection for a `get_object` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectQuery {
    /// Field equality filters, e.g. `("network_view", "default")`
    pub filters: Vec<(String, String)>,
    /// Extensible attribute filters (`*<name>=<value>`)
    pub ea_search: Ea,
    /// `_return_fields`; empty means the server default
    pub return_fields: Vec<String>,
}

impl ObjectQuery {
    /// Query built from a template object's non-empty fields
    pub fn search<T: IbObject>(template: &T) -> Self {
        Self {
            filters: template
                .search_fields()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            ea_search: Ea::new(),
            return_fields: T::RETURN_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_ea_search(mut self, ea: &Ea) -> Self {
        self.ea_search = ea.clone();
        self
    }

    #[must_use]
    pub fn with_return_fields(mut self, fields: &[&str]) -> Self {
        self.return_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }
}

/// Generic create/read/update/delete against the remote object store
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait IbConnector: Send + Sync {
    /// Create an object; returns its new reference
    async fn create_object(&self, object_type: &str, body: serde_json::Value) -> Result<String, InfobloxError>;

    /// With a reference: read that single object.
    /// Without: search `object_type` and return a JSON array, possibly empty.
    async fn get_object(
        &self,
        object_type: &str,
        reference: Option<&str>,
        query: &ObjectQuery,
    ) -> Result<serde_json::Value, InfobloxError>;

    /// Update the object at `reference`; returns the (possibly new) reference
    async fn update_object(&self, reference: &str, body: serde_json::Value) -> Result<String, InfobloxError>;

    /// Delete the object at `reference`; returns the deleted reference
    async fn delete_object(&self, reference: &str) -> Result<String, InfobloxError>;

    /// Send a batch of operations in one multi-object request
    ///
    /// `requests` is a JSON array of `{"method", "object", "data"}` entries.
    /// Returns the grid's per-entry results as a JSON array.
    async fn create_multi_object(&self, requests: serde_json::Value) -> Result<serde_json::Value, InfobloxError>;
}
