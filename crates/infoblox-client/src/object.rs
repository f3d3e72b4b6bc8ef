//! Common capability shared by every WAPI object type
//!
//! The object manager drives all create/read/update/delete traffic through a
//! single generic routine parameterized over [`IbObject`]. Each model only
//! describes its WAPI type name, the fields to ask for on reads, where its
//! reference lives, and which of its fields act as search filters.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ea::Ea;

/// A referenceable WAPI object
pub trait IbObject: Serialize + DeserializeOwned + Send + Sync {
    /// WAPI object type, e.g. `network` or `record:host`
    const OBJECT_TYPE: &'static str;

    /// Fields requested via `_return_fields` on reads
    const RETURN_FIELDS: &'static [&'static str];

    /// Object reference (`_ref`); empty until the object exists remotely
    fn reference(&self) -> &str;

    fn set_reference(&mut self, reference: String);

    /// Extensible attributes, for types that carry them
    fn ea(&self) -> Option<&Ea> {
        None
    }

    /// Search filters derived from the object's non-empty fields
    ///
    /// Zero-valued fields never appear here: an empty field means
    /// "don't filter on this".
    fn search_fields(&self) -> Vec<(&'static str, String)>;
}

/// Push `(name, value)` onto `fields` unless `value` is empty
pub(crate) fn push_filter(fields: &mut Vec<(&'static str, String)>, name: &'static str, value: &str) {
    if !value.is_empty() {
        fields.push((name, value.to_string()));
    }
}
