//! Object manager
//!
//! Typed facade over an [`IbConnector`]. Each method maps one domain action
//! (allocate an IP, create a host record, release a reservation, ...) onto one
//! or two generic connector calls, issued strictly in sequence.
//!
//! Conventions shared by every method:
//! - Singular reads return `Ok(None)` when nothing matches; not found is not
//!   an error.
//! - Connector errors are returned unchanged.
//! - Objects created or updated on behalf of a VM carry
//!   [`CloudIdentity::basic_vm_ea`]; networks and views carry
//!   [`CloudIdentity::basic_ea`]; CNAME records carry nothing.

use std::sync::Arc;
use tracing::{debug, info};

use crate::connector::{IbConnector, ObjectQuery};
use crate::ea::{CloudIdentity, Ea, NETWORK_NAME};
use crate::error::InfobloxError;
use crate::match_client::MatchClient;
use crate::models::*;
use crate::object::IbObject;
use crate::reference::{ip_address_from_ref, network_from_ref};

/// Typed client for WAPI objects
#[derive(Clone)]
pub struct ObjectManager {
    connector: Arc<dyn IbConnector>,
    identity: CloudIdentity,
}

impl std::fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectManager")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl ObjectManager {
    /// Object manager for a cloud adapter
    ///
    /// Cloud attributes start out omitted; use
    /// [`ObjectManager::with_identity`] with
    /// [`CloudIdentity::with_cloud_attrs`] to stamp them on objects.
    pub fn new(connector: Arc<dyn IbConnector>, cmp_type: &str, tenant_id: &str) -> Self {
        Self::with_identity(connector, CloudIdentity::new(cmp_type, tenant_id))
    }

    /// Object manager for local management: never emits cloud attributes
    pub fn new_local(connector: Arc<dyn IbConnector>) -> Self {
        Self::with_identity(connector, CloudIdentity::local())
    }

    pub fn with_identity(connector: Arc<dyn IbConnector>, identity: CloudIdentity) -> Self {
        Self { connector, identity }
    }

    pub fn identity(&self) -> &CloudIdentity {
        &self.identity
    }

    // Generic CRUD

    async fn create<T: IbObject>(&self, object: &T) -> Result<String, InfobloxError> {
        debug!(
            "Creating {} with {} extensible attributes",
            T::OBJECT_TYPE,
            object.ea().map_or(0, Ea::len)
        );
        let body = serde_json::to_value(object)?;
        self.connector.create_object(T::OBJECT_TYPE, body).await
    }

    async fn search<T: IbObject>(&self, query: ObjectQuery) -> Result<Vec<T>, InfobloxError> {
        debug!("Searching {} with filters: {:?}", T::OBJECT_TYPE, query.filters);
        let result = self.connector.get_object(T::OBJECT_TYPE, None, &query).await?;
        if result.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(result)?)
    }

    async fn find_first<T: IbObject>(&self, query: ObjectQuery) -> Result<Option<T>, InfobloxError> {
        Ok(self.search(query).await?.into_iter().next())
    }

    async fn get_by_ref<T: IbObject>(&self, reference: &str, query: &ObjectQuery) -> Result<T, InfobloxError> {
        debug!("Reading {} {}", T::OBJECT_TYPE, reference);
        let result = self
            .connector
            .get_object(T::OBJECT_TYPE, Some(reference), query)
            .await?;
        let mut object: T = serde_json::from_value(result)?;
        if object.reference().is_empty() {
            object.set_reference(reference.to_string());
        }
        Ok(object)
    }

    async fn read_ref<T: IbObject>(&self, reference: &str) -> Result<T, InfobloxError> {
        let query = ObjectQuery::default().with_return_fields(T::RETURN_FIELDS);
        self.get_by_ref(reference, &query).await
    }

    async fn update<T: IbObject>(&self, reference: &str, object: &T) -> Result<String, InfobloxError> {
        debug!("Updating {} {}", T::OBJECT_TYPE, reference);
        let body = serde_json::to_value(object)?;
        self.connector.update_object(reference, body).await
    }

    async fn delete(&self, reference: &str) -> Result<String, InfobloxError> {
        debug!("Deleting {}", reference);
        self.connector.delete_object(reference).await
    }

    // Network views

    pub async fn create_network_view(&self, name: &str) -> Result<NetworkView, InfobloxError> {
        let mut view = NetworkView {
            name: name.to_string(),
            ea: self.identity.basic_ea(false),
            ..Default::default()
        };
        view.reference = self.create(&view).await?;
        Ok(view)
    }

    pub async fn get_network_view(&self, name: &str) -> Result<Option<NetworkView>, InfobloxError> {
        let template = NetworkView {
            name: name.to_string(),
            ..Default::default()
        };
        self.find_first(ObjectQuery::search(&template)).await
    }

    /// Reference of the view called `name`, creating the view if needed
    async fn make_network_view(&self, name: &str) -> Result<String, InfobloxError> {
        if let Some(view) = self.get_network_view(name).await? {
            return Ok(view.reference);
        }
        info!("Network view {} not found, creating it", name);
        Ok(self.create_network_view(name).await?.reference)
    }

    /// Ensure both default views exist; returns (global ref, local ref)
    ///
    /// Read-then-create is not atomic: concurrent callers can both create.
    pub async fn create_default_network_views(
        &self,
        global_view: &str,
        local_view: &str,
    ) -> Result<(String, String), InfobloxError> {
        let global_ref = self.make_network_view(global_view).await?;
        let local_ref = self.make_network_view(local_view).await?;
        Ok((global_ref, local_ref))
    }

    /// Patch a view's extensible attributes
    ///
    /// Reads the current attributes, applies `add_ea` (overwriting existing
    /// keys), then drops every key named in `remove_ea`, and writes the result
    /// back in a single update.
    pub async fn update_network_view_ea(
        &self,
        reference: &str,
        add_ea: &Ea,
        remove_ea: &Ea,
    ) -> Result<(), InfobloxError> {
        let query = ObjectQuery::default().with_return_fields(&["extattrs"]);
        let mut view: NetworkView = self.get_by_ref(reference, &query).await?;

        for (name, value) in add_ea.iter() {
            view.ea.insert(name.clone(), value.clone());
        }
        for name in remove_ea.keys() {
            view.ea.remove(name);
        }

        self.update(reference, &view).await?;
        Ok(())
    }

    // Networks

    pub async fn create_network(&self, network_view: &str, cidr: &str, name: &str) -> Result<Network, InfobloxError> {
        let mut network = Network {
            network_view: network_view.to_string(),
            network: NetworkSpec::from(cidr),
            ea: self.identity.basic_ea(true),
            ..Default::default()
        };
        if !name.is_empty() {
            network.ea.insert(NETWORK_NAME, name);
        }
        network.reference = self.create(&network).await?;
        Ok(network)
    }

    pub async fn create_network_container(
        &self,
        network_view: &str,
        cidr: &str,
    ) -> Result<NetworkContainer, InfobloxError> {
        let mut container = NetworkContainer {
            network_view: network_view.to_string(),
            cidr: cidr.to_string(),
            ea: self.identity.basic_ea(true),
            ..Default::default()
        };
        container.reference = self.create(&container).await?;
        Ok(container)
    }

    /// First network in `network_view` matching `cidr` (if non-empty) and
    /// carrying every attribute in `ea` (if non-empty)
    pub async fn get_network(&self, network_view: &str, cidr: &str, ea: &Ea) -> Result<Option<Network>, InfobloxError> {
        let template = Network {
            network_view: network_view.to_string(),
            network: NetworkSpec::from(cidr),
            ..Default::default()
        };
        let mut query = ObjectQuery::search(&template);
        if !ea.is_empty() {
            query = query.with_ea_search(ea);
        }
        self.find_first(query).await
    }

    pub async fn get_network_by_ref(&self, reference: &str) -> Result<Network, InfobloxError> {
        self.read_ref(reference).await
    }

    pub async fn get_network_container(
        &self,
        network_view: &str,
        cidr: &str,
    ) -> Result<Option<NetworkContainer>, InfobloxError> {
        let template = NetworkContainer {
            network_view: network_view.to_string(),
            cidr: cidr.to_string(),
            ..Default::default()
        };
        self.find_first(ObjectQuery::search(&template)).await
    }

    /// Create the next free `/prefix_len` network inside `parent_cidr`
    ///
    /// The created network is decoded from the returned reference. An empty
    /// or undecodable reference yields `Ok(None)`.
    pub async fn allocate_network(
        &self,
        network_view: &str,
        parent_cidr: &str,
        prefix_len: u32,
        name: &str,
    ) -> Result<Option<Network>, InfobloxError> {
        let mut request = Network {
            network_view: network_view.to_string(),
            network: NetworkSpec::NextAvailable {
                parent_cidr: parent_cidr.to_string(),
                network_view: network_view.to_string(),
                prefix_len,
            },
            ea: self.identity.basic_ea(true),
            ..Default::default()
        };
        if !name.is_empty() {
            request.ea.insert(NETWORK_NAME, name);
        }

        let reference = self.create(&request).await?;
        if reference.is_empty() {
            return Ok(None);
        }
        Ok(network_from_ref(&reference))
    }

    /// Delete a network, but only if its reference names `network_view`
    ///
    /// A mismatched or undecodable reference is a silent no-op returning "".
    pub async fn delete_network(&self, reference: &str, network_view: &str) -> Result<String, InfobloxError> {
        match network_from_ref(reference) {
            Some(network) if network.network_view == network_view => self.delete(reference).await,
            _ => {
                debug!("Not deleting {}: not in network view {}", reference, network_view);
                Ok(String::new())
            }
        }
    }

    // Fixed addresses

    /// Reserve an IP address
    ///
    /// An empty `ip_addr` asks for the next free address in `cidr`; an empty
    /// `mac_address` becomes [`MAC_ADDR_ZERO`]. The returned address is the
    /// one decoded from the new reference.
    #[allow(clippy::too_many_arguments, reason = "mirrors the allocation inputs one-to-one")]
    pub async fn allocate_ip(
        &self,
        network_view: &str,
        cidr: &str,
        ip_addr: &str,
        mac_address: &str,
        name: &str,
        vm_id: &str,
        vm_name: &str,
    ) -> Result<FixedAddress, InfobloxError> {
        let mac = if mac_address.is_empty() { MAC_ADDR_ZERO } else { mac_address };

        let mut fixed_addr = FixedAddress {
            network_view: network_view.to_string(),
            cidr: cidr.to_string(),
            ipv4addr: IpAddressSpec::from_input(ip_addr, cidr, network_view),
            mac: mac.to_string(),
            name: name.to_string(),
            ea: self.identity.basic_vm_ea(true, vm_id, vm_name),
            ..Default::default()
        };

        let reference = self.create(&fixed_addr).await?;
        fixed_addr.ipv4addr = IpAddressSpec::Literal(ip_address_from_ref(&reference));
        fixed_addr.reference = reference;
        Ok(fixed_addr)
    }

    pub async fn get_fixed_address(
        &self,
        network_view: &str,
        cidr: &str,
        ip_addr: &str,
        mac_addr: &str,
    ) -> Result<Option<FixedAddress>, InfobloxError> {
        let template = FixedAddress {
            network_view: network_view.to_string(),
            cidr: cidr.to_string(),
            ipv4addr: IpAddressSpec::from(ip_addr),
            mac: mac_addr.to_string(),
            ..Default::default()
        };
        self.find_first(ObjectQuery::search(&template)).await
    }

    pub async fn get_fixed_address_by_ref(&self, reference: &str) -> Result<FixedAddress, InfobloxError> {
        self.read_ref(reference).await
    }

    pub async fn delete_fixed_address(&self, reference: &str) -> Result<String, InfobloxError> {
        self.delete(reference).await
    }

    /// Update MAC and/or match_client of a fixed address
    ///
    /// The VM attributes are replaced wholesale. An unknown `match_client`
    /// is rejected before anything is sent.
    pub async fn update_fixed_address(
        &self,
        reference: &str,
        match_client: &str,
        mac_address: &str,
        vm_id: &str,
        vm_name: &str,
    ) -> Result<FixedAddress, InfobloxError> {
        let match_client = if match_client.is_empty() {
            None
        } else {
            Some(match_client.parse::<MatchClient>()?)
        };

        let mut update = FixedAddress {
            mac: mac_address.to_string(),
            match_client,
            ea: self.identity.basic_vm_ea(true, vm_id, vm_name),
            ..Default::default()
        };

        update.reference = self.update(reference, &update).await?;
        Ok(update)
    }

    /// Delete the fixed address matching the given fields
    ///
    /// Releasing a lease that does not exist is a no-op returning "". A failed
    /// lookup is returned as an error and nothing is deleted.
    pub async fn release_ip(
        &self,
        network_view: &str,
        cidr: &str,
        ip_addr: &str,
        mac_addr: &str,
    ) -> Result<String, InfobloxError> {
        match self.get_fixed_address(network_view, cidr, ip_addr, mac_addr).await? {
            Some(fixed_addr) => self.delete(&fixed_addr.reference).await,
            None => {
                debug!("No fixed address {} in {}, nothing to release", ip_addr, network_view);
                Ok(String::new())
            }
        }
    }

    // Extensible attribute definitions

    pub async fn get_ea_definition(&self, name: &str) -> Result<Option<EaDefinition>, InfobloxError> {
        let template = EaDefinition {
            name: name.to_string(),
            ..Default::default()
        };
        self.find_first(ObjectQuery::search(&template)).await
    }

    pub async fn create_ea_definition(&self, definition: EaDefinition) -> Result<EaDefinition, InfobloxError> {
        let mut definition = definition;
        definition.reference = self.create(&definition).await?;
        Ok(definition)
    }

    // Host records

    /// Create a host record with one IPv4 binding, then re-read it so the
    /// server-assigned address is populated
    #[allow(clippy::too_many_arguments, reason = "mirrors the record inputs one-to-one")]
    pub async fn create_host_record(
        &self,
        enable_dns: bool,
        record_name: &str,
        network_view: &str,
        dns_view: &str,
        cidr: &str,
        ip_addr: &str,
        mac_address: &str,
        vm_id: &str,
        vm_name: &str,
    ) -> Result<HostRecord, InfobloxError> {
        let host = HostRecord {
            name: record_name.to_string(),
            view: dns_view.to_string(),
            network_view: network_view.to_string(),
            enable_dns: Some(enable_dns),
            ipv4addrs: vec![HostRecordIpv4Addr {
                ipv4addr: IpAddressSpec::from_input(ip_addr, cidr, network_view),
                mac: mac_address.to_string(),
                ..Default::default()
            }],
            ea: self.identity.basic_vm_ea(true, vm_id, vm_name),
            ..Default::default()
        };

        let reference = self.create(&host).await?;
        self.read_ref(&reference).await
    }

    pub async fn get_host_record_by_ref(&self, reference: &str) -> Result<HostRecord, InfobloxError> {
        self.read_ref(reference).await
    }

    /// First host record named `record_name`
    ///
    /// Only the name is used as a filter; the remaining arguments are
    /// accepted for signature compatibility.
    pub async fn get_host_record(
        &self,
        record_name: &str,
        _network_view: &str,
        _cidr: &str,
        _ip_addr: &str,
    ) -> Result<Option<HostRecord>, InfobloxError> {
        let template = HostRecord {
            name: record_name.to_string(),
            ..Default::default()
        };
        self.find_first(ObjectQuery::search(&template)).await
    }

    /// Current address of the host's first IPv4 binding ("" if it has none)
    pub async fn get_ip_address_from_host_record(&self, host: &HostRecord) -> Result<String, InfobloxError> {
        let current: HostRecord = self.read_ref(&host.reference).await?;
        Ok(current
            .ipv4addrs
            .first()
            .map(|binding| binding.ip_address().to_string())
            .unwrap_or_default())
    }

    /// Replace the host's IPv4 binding and VM attributes
    pub async fn update_host_record(
        &self,
        reference: &str,
        ip_addr: &str,
        mac_address: &str,
        vm_id: &str,
        vm_name: &str,
    ) -> Result<String, InfobloxError> {
        let update = HostRecord {
            ipv4addrs: vec![HostRecordIpv4Addr {
                ipv4addr: IpAddressSpec::from(ip_addr),
                mac: mac_address.to_string(),
                ..Default::default()
            }],
            ea: self.identity.basic_vm_ea(true, vm_id, vm_name),
            ..Default::default()
        };
        self.update(reference, &update).await
    }

    pub async fn delete_host_record(&self, reference: &str) -> Result<String, InfobloxError> {
        self.delete(reference).await
    }

    // A records

    #[allow(clippy::too_many_arguments, reason = "mirrors the record inputs one-to-one")]
    pub async fn create_a_record(
        &self,
        network_view: &str,
        dns_view: &str,
        record_name: &str,
        cidr: &str,
        ip_addr: &str,
        vm_id: &str,
        vm_name: &str,
    ) -> Result<RecordA, InfobloxError> {
        let mut record = RecordA {
            name: record_name.to_string(),
            view: dns_view.to_string(),
            ipv4addr: IpAddressSpec::from_input(ip_addr, cidr, network_view),
            ea: self.identity.basic_vm_ea(true, vm_id, vm_name),
            ..Default::default()
        };
        record.reference = self.create(&record).await?;
        Ok(record)
    }

    pub async fn get_a_record_by_ref(&self, reference: &str) -> Result<RecordA, InfobloxError> {
        self.read_ref(reference).await
    }

    pub async fn delete_a_record(&self, reference: &str) -> Result<String, InfobloxError> {
        self.delete(reference).await
    }

    // CNAME records

    pub async fn create_cname_record(
        &self,
        canonical: &str,
        record_name: &str,
        dns_view: &str,
    ) -> Result<RecordCname, InfobloxError> {
        let mut record = RecordCname {
            name: record_name.to_string(),
            canonical: canonical.to_string(),
            view: dns_view.to_string(),
            ..Default::default()
        };
        record.reference = self.create(&record).await?;
        Ok(record)
    }

    pub async fn get_cname_record_by_ref(&self, reference: &str) -> Result<RecordCname, InfobloxError> {
        self.read_ref(reference).await
    }

    pub async fn delete_cname_record(&self, reference: &str) -> Result<String, InfobloxError> {
        self.delete(reference).await
    }

    // PTR records

    #[allow(clippy::too_many_arguments, reason = "mirrors the record inputs one-to-one")]
    pub async fn create_ptr_record(
        &self,
        network_view: &str,
        dns_view: &str,
        record_name: &str,
        cidr: &str,
        ip_addr: &str,
        vm_id: &str,
        vm_name: &str,
    ) -> Result<RecordPtr, InfobloxError> {
        let mut record = RecordPtr {
            ptrdname: record_name.to_string(),
            view: dns_view.to_string(),
            ipv4addr: IpAddressSpec::from_input(ip_addr, cidr, network_view),
            ea: self.identity.basic_vm_ea(true, vm_id, vm_name),
            ..Default::default()
        };
        record.reference = self.create(&record).await?;
        Ok(record)
    }

    pub async fn get_ptr_record_by_ref(&self, reference: &str) -> Result<RecordPtr, InfobloxError> {
        self.read_ref(reference).await
    }

    pub async fn delete_ptr_record(&self, reference: &str) -> Result<String, InfobloxError> {
        self.delete(reference).await
    }

    // Multi-object requests

    /// Send several operations in one `request` call
    ///
    /// `requests` is a JSON array of `{"method", "object", "data"}` entries.
    /// Each per-entry result is returned as a JSON object, in request order.
    pub async fn create_multi_object(
        &self,
        requests: serde_json::Value,
    ) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, InfobloxError> {
        debug!(
            "Sending multi-object request with {} entries",
            requests.as_array().map_or(0, Vec::len)
        );
        let result = self.connector.create_multi_object(requests).await?;
        Ok(serde_json::from_value(result)?)
    }

    // Grid inventory

    pub async fn get_all_members(&self) -> Result<Vec<Member>, InfobloxError> {
        self.search(ObjectQuery::search(&Member::default())).await
    }

    pub async fn get_capacity_report(&self, name: &str) -> Result<Vec<CapacityReport>, InfobloxError> {
        let template = CapacityReport {
            name: name.to_string(),
            ..Default::default()
        };
        self.search(ObjectQuery::search(&template)).await
    }

    pub async fn get_license(&self) -> Result<Vec<License>, InfobloxError> {
        self.search(ObjectQuery::search(&License::default())).await
    }

    pub async fn get_grid_license(&self) -> Result<Vec<License>, InfobloxError> {
        let licenses: Vec<GridLicense> = self.search(ObjectQuery::search(&GridLicense::default())).await?;
        Ok(licenses.into_iter().map(|l| l.0).collect())
    }

    pub async fn get_grid_info(&self) -> Result<Vec<Grid>, InfobloxError> {
        self.search(ObjectQuery::search(&Grid::default())).await
    }

    /// Upgrade status for `status_type` (GRID, GROUP or MEMBER)
    pub async fn get_upgrade_status(&self, status_type: &str) -> Result<Vec<UpgradeStatus>, InfobloxError> {
        if status_type.is_empty() {
            return Err(InfobloxError::InvalidRequest("status type can not be empty".to_string()));
        }
        let template = UpgradeStatus {
            status_type: status_type.to_string(),
            ..Default::default()
        };
        self.search(ObjectQuery::search(&template)).await
    }
}
