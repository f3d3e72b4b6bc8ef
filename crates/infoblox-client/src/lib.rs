//! Infoblox WAPI Client
//!
//! A Rust client library for managing IPAM and DNS objects on an Infoblox
//! grid through its REST API (WAPI). An [`ObjectManager`] turns domain
//! actions into generic object CRUD calls on an [`IbConnector`], stamping the
//! caller's cloud identity onto every object it creates.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use infoblox_client::{CloudIdentity, ObjectManager, WapiConnector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect using INFOBLOX_* environment variables
//! let connector = WapiConnector::from_env()?;
//!
//! let identity = CloudIdentity::new("OpenStack", "tenant-42").with_cloud_attrs(true);
//! let manager = ObjectManager::with_identity(Arc::new(connector), identity);
//!
//! // Make sure the default views exist
//! manager.create_default_network_views("global_view", "local_view").await?;
//!
//! // Reserve the next free address in a network
//! let fixed = manager
//!     .allocate_ip("global_view", "10.0.0.0/24", "", "", "web01", "vm-1", "web01")
//!     .await?;
//! println!("Allocated {}", fixed.ip_address());
//!
//! // And give it back
//! manager.release_ip("global_view", "10.0.0.0/24", fixed.ip_address(), "").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **IPAM Operations**: Network views, networks, containers, fixed addresses
//! - **DNS Records**: Host, A, PTR and CNAME records
//! - **Next-Available Allocation**: Server-side selection of free IPs and subnets
//! - **Grid Inventory**: Members, licenses, capacity and upgrade status

pub mod config;
pub mod connector;
pub mod ea;
pub mod error;
pub mod match_client;
pub mod models;
pub mod object;
pub mod object_manager;
pub mod reference;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

#[cfg(test)]
mod object_manager_test;

pub use config::{HostConfig, TransportConfig};
pub use connector::{IbConnector, ObjectQuery, WapiConnector};
pub use ea::{CloudIdentity, Ea, EaValue};
pub use error::InfobloxError;
pub use match_client::{MatchClient, is_valid_match_client};
pub use models::*;
pub use object::IbObject;
pub use object_manager::ObjectManager;
pub use reference::{ip_address_from_ref, network_from_ref, network_view_from_ref};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{ConnectorCall, MockConnector, MockOperation};
