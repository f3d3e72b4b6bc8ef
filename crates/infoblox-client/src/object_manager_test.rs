//! Unit tests for the object manager, run against MockConnector

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::connector::{IbConnector, ObjectQuery};
    use crate::ea::{CLOUD_API_OWNED, CloudIdentity, Ea, EaValue, NETWORK_NAME, TENANT_ID, VM_ID, VM_NAME};
    use crate::error::InfobloxError;
    use crate::mock::{ConnectorCall, MockConnector, MockOperation};
    use crate::models::*;
    use crate::object_manager::ObjectManager;

    fn local_manager(mock: &MockConnector) -> ObjectManager {
        ObjectManager::new_local(Arc::new(mock.clone()))
    }

    fn cloud_manager(mock: &MockConnector) -> ObjectManager {
        let identity = CloudIdentity::new("OpenStack", "tenant-42").with_cloud_attrs(true);
        ObjectManager::with_identity(Arc::new(mock.clone()), identity)
    }

    fn created_body(mock: &MockConnector, index: usize) -> serde_json::Value {
        let creates: Vec<serde_json::Value> = mock
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                ConnectorCall::Create { body, .. } => Some(body),
                _ => None,
            })
            .collect();
        creates[index].clone()
    }

    /// Connector whose creates succeed with an empty reference
    struct EmptyRefConnector;

    #[async_trait::async_trait]
    impl IbConnector for EmptyRefConnector {
        async fn create_object(&self, _object_type: &str, _body: serde_json::Value) -> Result<String, InfobloxError> {
            Ok(String::new())
        }

        async fn get_object(
            &self,
            _object_type: &str,
            _reference: Option<&str>,
            _query: &ObjectQuery,
        ) -> Result<serde_json::Value, InfobloxError> {
            Ok(json!([]))
        }

        async fn update_object(&self, reference: &str, _body: serde_json::Value) -> Result<String, InfobloxError> {
            Ok(reference.to_string())
        }

        async fn delete_object(&self, reference: &str) -> Result<String, InfobloxError> {
            Ok(reference.to_string())
        }

        async fn create_multi_object(&self, _requests: serde_json::Value) -> Result<serde_json::Value, InfobloxError> {
            Ok(json!([]))
        }
    }

    #[tokio::test]
    async fn test_constructors_omit_cloud_attrs() {
        let mock = MockConnector::new();
        let manager = ObjectManager::new(Arc::new(mock.clone()), "OpenStack", "tenant-42");
        assert!(manager.identity().omit_cloud_attrs);
        assert_eq!(manager.identity().tenant_id, "tenant-42");

        manager.create_network("default", "10.0.0.0/24", "").await.unwrap();
        assert!(created_body(&mock, 0).get("extattrs").is_none());
    }

    #[tokio::test]
    async fn test_create_default_network_views_creates_missing() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);

        let (global_ref, local_ref) = manager
            .create_default_network_views("global_view", "local_view")
            .await
            .unwrap();

        assert!(global_ref.ends_with(":global_view/false"));
        assert!(local_ref.ends_with(":local_view/false"));
        assert_eq!(mock.call_count(MockOperation::Create), 2);

        let body = created_body(&mock, 0);
        assert_eq!(body["name"], "global_view");
        assert_eq!(body["extattrs"][CLOUD_API_OWNED]["value"], "False");
        assert_eq!(body["extattrs"][TENANT_ID]["value"], "tenant-42");
    }

    #[tokio::test]
    async fn test_create_default_network_views_reuses_existing() {
        let mock = MockConnector::new();
        let existing = mock.add_object("networkview", json!({ "name": "global_view" }));
        let manager = local_manager(&mock);

        let (global_ref, _) = manager
            .create_default_network_views("global_view", "local_view")
            .await
            .unwrap();

        assert_eq!(global_ref, existing);
        assert_eq!(mock.call_count(MockOperation::Create), 1);
        assert_eq!(mock.references("networkview").len(), 2);
    }

    #[tokio::test]
    async fn test_create_default_network_views_both_exist() {
        let mock = MockConnector::new();
        let global = mock.add_object("networkview", json!({ "name": "global_view" }));
        let local = mock.add_object("networkview", json!({ "name": "local_view" }));
        let manager = local_manager(&mock);

        let refs = manager
            .create_default_network_views("global_view", "local_view")
            .await
            .unwrap();

        assert_eq!(refs, (global, local));
        assert_eq!(mock.call_count(MockOperation::Create), 0);
    }

    #[tokio::test]
    async fn test_get_network_view_not_found() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        assert_eq!(manager.get_network_view("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_network_view_ea_adds_then_removes() {
        let mock = MockConnector::new();
        let reference = mock.add_object(
            "networkview",
            json!({
                "name": "view1",
                "extattrs": { "A": { "value": 1 }, "B": { "value": "x" } }
            }),
        );
        let manager = local_manager(&mock);

        let mut add = Ea::new();
        add.insert("B", "y");
        add.insert("C", true);
        let mut remove = Ea::new();
        remove.insert("A", "ignored");

        manager.update_network_view_ea(&reference, &add, &remove).await.unwrap();

        assert_eq!(mock.call_count(MockOperation::Get), 1);
        assert_eq!(mock.call_count(MockOperation::Update), 1);
        let stored = mock.object(&reference).unwrap();
        assert_eq!(
            stored["extattrs"],
            json!({ "B": { "value": "y" }, "C": { "value": "True" } })
        );
        assert_eq!(stored["name"], "view1");
    }

    #[tokio::test]
    async fn test_update_network_view_ea_keeps_list_attributes() {
        let mock = MockConnector::new();
        let reference = mock.add_object(
            "networkview",
            json!({
                "name": "v1",
                "extattrs": { "Sites": { "value": ["a", "b"] } }
            }),
        );
        let manager = local_manager(&mock);

        let view = manager.get_network_view("v1").await.unwrap().unwrap();
        assert_eq!(view.ea.get("Sites"), Some(&EaValue::from(vec!["a", "b"])));

        let mut add = Ea::new();
        add.insert("Owner", "y");
        manager.update_network_view_ea(&reference, &add, &Ea::new()).await.unwrap();

        assert_eq!(
            mock.object(&reference).unwrap()["extattrs"],
            json!({ "Owner": { "value": "y" }, "Sites": { "value": ["a", "b"] } })
        );
    }

    #[tokio::test]
    async fn test_update_network_view_ea_can_clear_all() {
        let mock = MockConnector::new();
        let reference = mock.add_object(
            "networkview",
            json!({ "name": "view1", "extattrs": { "A": { "value": "a" } } }),
        );
        let manager = local_manager(&mock);

        let mut remove = Ea::new();
        remove.insert("A", "");
        manager.update_network_view_ea(&reference, &Ea::new(), &remove).await.unwrap();

        assert_eq!(mock.object(&reference).unwrap()["extattrs"], json!({}));
    }

    #[tokio::test]
    async fn test_create_network_with_name() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);

        let network = manager.create_network("default", "10.0.0.0/24", "frontend").await.unwrap();

        assert!(network.reference.ends_with(":10.0.0.0/24/default"));
        assert_eq!(network.cidr(), "10.0.0.0/24");
        assert_eq!(network.ea.get(NETWORK_NAME), Some(&EaValue::String("frontend".to_string())));
        assert_eq!(network.ea.get(CLOUD_API_OWNED), Some(&EaValue::Bool(true)));
    }

    #[tokio::test]
    async fn test_network_by_ref() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);
        let created = manager.create_network("default", "10.2.0.0/24", "backend").await.unwrap();

        let read = manager.get_network_by_ref(&created.reference).await.unwrap();
        assert_eq!(read.reference, created.reference);
        assert_eq!(read.cidr(), "10.2.0.0/24");
        assert_eq!(read.network_view, "default");
        assert_eq!(read.ea, created.ea);
    }

    #[tokio::test]
    async fn test_create_network_duplicate_is_connector_error() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        manager.create_network("default", "10.0.0.0/24", "").await.unwrap();
        let result = manager.create_network("default", "10.0.0.0/24", "").await;
        assert!(matches!(result, Err(InfobloxError::Api(_))));
    }

    #[tokio::test]
    async fn test_get_network_with_ea_search() {
        let mock = MockConnector::new();
        mock.add_object(
            "network",
            json!({
                "network": "10.0.0.0/24",
                "network_view": "default",
                "extattrs": { "Tenant ID": { "value": "t-1" } }
            }),
        );
        mock.add_object(
            "network",
            json!({
                "network": "10.0.1.0/24",
                "network_view": "default",
                "extattrs": { "Tenant ID": { "value": "t-2" } }
            }),
        );
        let manager = local_manager(&mock);

        let mut ea = Ea::new();
        ea.insert(TENANT_ID, "t-2");
        let network = manager.get_network("default", "", &ea).await.unwrap().unwrap();
        assert_eq!(network.cidr(), "10.0.1.0/24");

        ea.insert(TENANT_ID, "t-3");
        assert_eq!(manager.get_network("default", "", &ea).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_network_container_round_trip() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        let created = manager.create_network_container("default", "10.0.0.0/16").await.unwrap();
        let found = manager
            .get_network_container("default", "10.0.0.0/16")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.reference, created.reference);
        assert_eq!(found.cidr, "10.0.0.0/16");
    }

    #[tokio::test]
    async fn test_allocate_network_decodes_reference() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        let first = manager.allocate_network("default", "10.0.0.0/16", 24, "").await.unwrap().unwrap();
        let second = manager.allocate_network("default", "10.0.0.0/16", 24, "").await.unwrap().unwrap();

        assert_eq!(first.cidr(), "10.0.0.0/24");
        assert_eq!(first.network_view, "default");
        assert_eq!(second.cidr(), "10.0.1.0/24");
        assert_eq!(
            created_body(&mock, 0)["network"],
            "func:nextavailablenetwork:10.0.0.0/16,default,24"
        );
    }

    #[tokio::test]
    async fn test_allocate_network_empty_reference() {
        let manager = ObjectManager::new_local(Arc::new(EmptyRefConnector));
        let network = manager.allocate_network("default", "10.0.0.0/16", 24, "").await.unwrap();
        assert_eq!(network, None);
    }

    #[tokio::test]
    async fn test_delete_network_checks_view() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        let network = manager.create_network("default", "10.0.0.0/24", "").await.unwrap();

        let result = manager.delete_network(&network.reference, "other_view").await.unwrap();
        assert_eq!(result, "");
        assert_eq!(mock.call_count(MockOperation::Delete), 0);

        let result = manager.delete_network(&network.reference, "default").await.unwrap();
        assert_eq!(result, network.reference);
        assert!(mock.references("network").is_empty());
    }

    #[tokio::test]
    async fn test_allocate_ip_next_available_with_zero_mac() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);

        let fixed = manager
            .allocate_ip("default", "10.0.0.0/24", "", "", "", "vm-1", "web01")
            .await
            .unwrap();

        assert_eq!(fixed.ip_address(), "10.0.0.1");
        assert_eq!(fixed.mac, MAC_ADDR_ZERO);

        let body = created_body(&mock, 0);
        assert_eq!(body["ipv4addr"], "func:nextavailableip:10.0.0.0/24,default");
        assert_eq!(body["mac"], MAC_ADDR_ZERO);
        assert_eq!(body["extattrs"][VM_ID]["value"], "vm-1");
        assert_eq!(body["extattrs"][VM_NAME]["value"], "web01");
    }

    #[tokio::test]
    async fn test_allocate_ip_explicit_address() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        let fixed = manager
            .allocate_ip("default", "10.0.0.0/24", "10.0.0.50", "aa:bb:cc:dd:ee:ff", "web01", "", "")
            .await
            .unwrap();

        assert_eq!(fixed.ip_address(), "10.0.0.50");
        assert!(fixed.reference.ends_with(":10.0.0.50/default"));

        let found = manager
            .get_fixed_address("default", "", "10.0.0.50", "aa:bb:cc:dd:ee:ff")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.reference, fixed.reference);
        assert_eq!(found.name, "web01");
    }

    #[tokio::test]
    async fn test_release_ip_deletes_match() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        let fixed = manager
            .allocate_ip("default", "10.0.0.0/24", "10.0.0.7", "", "", "", "")
            .await
            .unwrap();

        let released = manager.release_ip("default", "10.0.0.0/24", "10.0.0.7", "").await.unwrap();
        assert_eq!(released, fixed.reference);
        assert!(mock.references("fixedaddress").is_empty());
    }

    #[tokio::test]
    async fn test_release_ip_missing_is_noop() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        let released = manager.release_ip("default", "", "10.0.0.9", "").await.unwrap();
        assert_eq!(released, "");
        assert_eq!(mock.call_count(MockOperation::Delete), 0);
    }

    #[tokio::test]
    async fn test_release_ip_lookup_failure_is_returned() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        manager
            .allocate_ip("default", "10.0.0.0/24", "10.0.0.7", "", "", "", "")
            .await
            .unwrap();
        mock.fail_operation(MockOperation::Get);

        let result = manager.release_ip("default", "10.0.0.0/24", "10.0.0.7", "").await;
        assert!(matches!(result, Err(InfobloxError::Api(_))));
        assert_eq!(mock.call_count(MockOperation::Delete), 0);
        assert_eq!(mock.references("fixedaddress").len(), 1);
    }

    #[tokio::test]
    async fn test_fixed_address_by_ref() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        let fixed = manager
            .allocate_ip("default", "10.0.0.0/24", "10.0.0.8", "aa:bb:cc:dd:ee:01", "web02", "", "")
            .await
            .unwrap();

        let read = manager.get_fixed_address_by_ref(&fixed.reference).await.unwrap();
        assert_eq!(read.reference, fixed.reference);
        assert_eq!(read.ip_address(), "10.0.0.8");
        assert_eq!(read.mac, "aa:bb:cc:dd:ee:01");
        assert_eq!(read.cidr, "10.0.0.0/24");
        assert_eq!(read.network_view, "default");
        assert_eq!(read.name, "web02");

        manager.delete_fixed_address(&fixed.reference).await.unwrap();
        assert!(mock.references("fixedaddress").is_empty());
    }

    #[tokio::test]
    async fn test_update_fixed_address_rejects_bad_match_client() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        let result = manager
            .update_fixed_address("fixedaddress/abc:10.0.0.1/default", "SERIAL_NUMBER", "", "", "")
            .await;

        assert!(matches!(result, Err(InfobloxError::InvalidMatchClient(ref v)) if v == "SERIAL_NUMBER"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_fixed_address_replaces_vm_attributes() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);
        let fixed = manager
            .allocate_ip("default", "10.0.0.0/24", "10.0.0.3", "", "", "vm-old", "old")
            .await
            .unwrap();

        let updated = manager
            .update_fixed_address(&fixed.reference, "MAC_ADDRESS", "aa:bb:cc:dd:ee:ff", "vm-new", "")
            .await
            .unwrap();
        assert_eq!(updated.reference, fixed.reference);

        let stored = mock.object(&fixed.reference).unwrap();
        assert_eq!(stored["match_client"], "MAC_ADDRESS");
        assert_eq!(stored["mac"], "aa:bb:cc:dd:ee:ff");
        assert_eq!(stored["extattrs"][VM_ID]["value"], "vm-new");
        assert!(stored["extattrs"].get(VM_NAME).is_none());
    }

    #[tokio::test]
    async fn test_ea_definition_lookup() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        assert_eq!(manager.get_ea_definition("Tenant ID").await.unwrap(), None);

        let created = manager
            .create_ea_definition(EaDefinition {
                name: "Tenant ID".to_string(),
                ea_type: "STRING".to_string(),
                comment: "Tenant owning the object".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let found = manager.get_ea_definition("Tenant ID").await.unwrap().unwrap();
        assert_eq!(found.reference, created.reference);
        assert_eq!(found.ea_type, "STRING");
    }

    #[tokio::test]
    async fn test_create_host_record_creates_then_reads() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);

        let host = manager
            .create_host_record(
                true,
                "web01.example.com",
                "default",
                "default.default",
                "10.0.0.0/24",
                "",
                "aa:bb:cc:dd:ee:ff",
                "vm-1",
                "web01",
            )
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], ConnectorCall::Create { object_type, .. } if object_type == "record:host"));
        assert!(matches!(&calls[1], ConnectorCall::Get { reference: Some(r), .. } if *r == host.reference));

        assert_eq!(host.name, "web01.example.com");
        assert_eq!(host.network_view, "default");
        assert_eq!(host.enable_dns, Some(true));
        assert_eq!(host.ipv4addrs[0].ip_address(), "10.0.0.1");
        assert_eq!(host.ea.get(VM_ID), Some(&EaValue::String("vm-1".to_string())));
    }

    #[tokio::test]
    async fn test_host_record_ip_lookup_and_update() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);
        let host = manager
            .create_host_record(false, "db01", "default", "default", "10.0.0.0/24", "10.0.0.20", "", "", "")
            .await
            .unwrap();

        assert_eq!(manager.get_ip_address_from_host_record(&host).await.unwrap(), "10.0.0.20");

        let reference = manager
            .update_host_record(&host.reference, "10.0.0.21", "", "", "")
            .await
            .unwrap();
        assert_eq!(reference, host.reference);
        assert_eq!(manager.get_ip_address_from_host_record(&host).await.unwrap(), "10.0.0.21");
    }

    #[tokio::test]
    async fn test_host_record_without_bindings() {
        let mock = MockConnector::new();
        let reference = mock.add_object("record:host", json!({ "name": "empty", "view": "default" }));
        let manager = local_manager(&mock);

        let host = manager.get_host_record_by_ref(&reference).await.unwrap();
        assert_eq!(manager.get_ip_address_from_host_record(&host).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_get_host_record_filters_by_name_only() {
        let mock = MockConnector::new();
        mock.add_object("record:host", json!({ "name": "web01", "view": "default" }));
        let manager = local_manager(&mock);

        let host = manager
            .get_host_record("web01", "other_view", "10.0.0.0/24", "10.0.0.1")
            .await
            .unwrap();
        assert!(host.is_some());

        let calls = mock.calls();
        let ConnectorCall::Get { query, .. } = &calls[0] else {
            panic!("expected a get call");
        };
        assert_eq!(query.filters, vec![("name".to_string(), "web01".to_string())]);
    }

    #[tokio::test]
    async fn test_delete_host_record() {
        let mock = MockConnector::new();
        let reference = mock.add_object("record:host", json!({ "name": "web01", "view": "default" }));
        let manager = local_manager(&mock);

        assert_eq!(manager.delete_host_record(&reference).await.unwrap(), reference);
        assert!(mock.references("record:host").is_empty());
    }

    #[tokio::test]
    async fn test_a_and_ptr_records() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);

        let a = manager
            .create_a_record("default", "default", "web01.example.com", "10.0.0.0/24", "10.0.0.5", "vm-1", "")
            .await
            .unwrap();
        let ptr = manager
            .create_ptr_record("default", "default", "web01.example.com", "10.0.0.0/24", "", "vm-1", "")
            .await
            .unwrap();

        let read_a = manager.get_a_record_by_ref(&a.reference).await.unwrap();
        assert_eq!(read_a.ipv4addr.as_literal(), Some("10.0.0.5"));
        assert_eq!(read_a.ea.get(VM_ID), Some(&EaValue::String("vm-1".to_string())));

        let read_ptr = manager.get_ptr_record_by_ref(&ptr.reference).await.unwrap();
        assert_eq!(read_ptr.ptrdname, "web01.example.com");
        assert_eq!(read_ptr.ipv4addr.as_literal(), Some("10.0.0.1"));

        manager.delete_a_record(&a.reference).await.unwrap();
        manager.delete_ptr_record(&ptr.reference).await.unwrap();
        assert!(mock.references("record:a").is_empty());
        assert!(mock.references("record:ptr").is_empty());
    }

    #[tokio::test]
    async fn test_cname_record_has_no_attributes() {
        let mock = MockConnector::new();
        let manager = cloud_manager(&mock);

        let cname = manager
            .create_cname_record("web01.example.com", "www.example.com", "default")
            .await
            .unwrap();

        assert!(created_body(&mock, 0).get("extattrs").is_none());
        let read = manager.get_cname_record_by_ref(&cname.reference).await.unwrap();
        assert_eq!(read.canonical, "web01.example.com");

        manager.delete_cname_record(&cname.reference).await.unwrap();
        assert!(mock.references("record:cname").is_empty());
    }

    #[tokio::test]
    async fn test_create_multi_object() {
        let mock = MockConnector::new();
        let view = mock.add_object("networkview", json!({ "name": "old_view" }));
        let manager = local_manager(&mock);

        let results = manager
            .create_multi_object(json!([
                { "method": "POST", "object": "network", "data": { "network": "10.9.0.0/24", "network_view": "default" } },
                { "method": "DELETE", "object": view },
            ]))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        let network_ref = results[0]["_ref"].as_str().unwrap();
        assert!(network_ref.ends_with(":10.9.0.0/24/default"));
        assert_eq!(results[1]["_ref"], view.as_str());
        assert!(mock.references("networkview").is_empty());
        assert_eq!(mock.call_count(MockOperation::Multi), 1);
        assert_eq!(mock.call_count(MockOperation::Create), 0);
    }

    #[tokio::test]
    async fn test_create_multi_object_error_passes_through() {
        let mock = MockConnector::new();
        mock.fail_operation(MockOperation::Multi);
        let manager = local_manager(&mock);

        let result = manager
            .create_multi_object(json!([{ "method": "POST", "object": "networkview", "data": { "name": "v" } }]))
            .await;
        assert!(matches!(result, Err(InfobloxError::Api(_))));
        assert!(mock.references("networkview").is_empty());
    }

    #[tokio::test]
    async fn test_grid_inventory_reads() {
        let mock = MockConnector::new();
        mock.add_object("member", json!({ "host_name": "gm.example.com", "platform": "VNIOS" }));
        mock.add_object(
            "license:gridwide",
            json!({ "type": "NIOS", "expiry_date": 1_900_000_000_i64, "limit": "100" }),
        );
        mock.add_object("grid", json!({ "name": "Infoblox" }));
        mock.add_object(
            "capacityreport",
            json!({ "name": "gm.example.com", "max_capacity": 110_000, "percent_used": 3 }),
        );
        mock.add_object(
            "upgradestatus",
            json!({ "type": "GRID", "current_version": "8.6.0", "upgrade_state": "NONE" }),
        );
        let manager = local_manager(&mock);

        let members = manager.get_all_members().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].host_name, "gm.example.com");

        let licenses = manager.get_grid_license().await.unwrap();
        assert_eq!(licenses[0].license_type, "NIOS");
        assert_eq!(licenses[0].expiry_date, 1_900_000_000);

        assert_eq!(manager.get_grid_info().await.unwrap()[0].name, "Infoblox");
        assert!(manager.get_license().await.unwrap().is_empty());

        let report = manager.get_capacity_report("gm.example.com").await.unwrap();
        assert_eq!(report[0].max_capacity, 110_000);
        assert!(manager.get_capacity_report("other").await.unwrap().is_empty());

        let status = manager.get_upgrade_status("GRID").await.unwrap();
        assert_eq!(status[0].current_version, "8.6.0");
    }

    #[tokio::test]
    async fn test_upgrade_status_requires_type() {
        let mock = MockConnector::new();
        let manager = local_manager(&mock);

        let result = manager.get_upgrade_status("").await;
        assert!(matches!(result, Err(InfobloxError::InvalidRequest(_))));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_connector_errors_pass_through() {
        let mock = MockConnector::new();
        mock.fail_operation(MockOperation::Create);
        let manager = local_manager(&mock);

        let result = manager.create_network_view("view1").await;
        assert!(matches!(result, Err(InfobloxError::Api(_))));

        let result = manager.get_network_by_ref("network/abc:10.0.0.0/24/default").await;
        assert!(matches!(result, Err(InfobloxError::NotFound(_))));
    }
}
