//! HTTP connector for the Infoblox WAPI
//!
//! Request shapes:
//! - create: `POST <type>` with a JSON body, returns the reference as a JSON string
//! - read: `GET <type>?<filters>` or `GET <ref>`, with `_return_fields`
//! - update: `PUT <ref>` with a JSON body, returns the reference
//! - delete: `DELETE <ref>`, returns the reference
//! - multi-object: `POST request` with an array of operations, returns an array

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

use super::{IbConnector, ObjectQuery};
use crate::config::{HostConfig, TransportConfig};
use crate::error::InfobloxError;

const MULTI_REQUEST_PATH: &str = "request";

/// WAPI connector over HTTPS with basic auth
pub struct WapiConnector {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl fmt::Debug for WapiConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WapiConnector")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl WapiConnector {
    /// Create a new connector
    ///
    /// # Arguments
    /// * `host` - Grid master address, WAPI version and credentials
    /// * `transport` - TLS verification, timeout and pool size
    pub fn new(host: &HostConfig, transport: &TransportConfig) -> Result<Self, InfobloxError> {
        let client = Client::builder()
            .timeout(transport.http_request_timeout)
            .pool_max_idle_per_host(transport.http_pool_connections)
            .danger_accept_invalid_certs(!transport.ssl_verify)
            .build()?;

        Ok(Self {
            client,
            base_url: host.base_url(),
            username: host.username.clone(),
            password: host.password.clone(),
        })
    }

    /// Build a connector from `INFOBLOX_*` environment variables
    pub fn from_env() -> Result<Self, InfobloxError> {
        Self::new(&HostConfig::from_env()?, &TransportConfig::from_env()?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from an object type or reference
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build the query string for a search or read
    pub fn build_query_string(&self, query: &ObjectQuery) -> String {
        let mut params: Vec<String> = query
            .filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();

        for (name, value) in query.ea_search.iter() {
            params.push(format!(
                "*{}={}",
                urlencoding::encode(name),
                urlencoding::encode(&value.to_string())
            ));
        }

        if !query.return_fields.is_empty() {
            params.push(format!("_return_fields={}", query.return_fields.join(",")));
        }

        params.join("&")
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
    }

    async fn read_response<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        response: Response,
    ) -> Result<T, InfobloxError> {
        let status = response.status();

        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(InfobloxError::Authentication(format!("{} - {}", status, body)));
        }

        if status == 404 {
            let body = response.text().await.unwrap_or_default();
            return Err(InfobloxError::NotFound(format!(
                "Object not found: {} - {}",
                path, body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfobloxError::Api(format!(
                "{} {} failed: {} - {}",
                method, path, status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            InfobloxError::Api(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ))
        })
    }
}

#[async_trait::async_trait]
impl IbConnector for WapiConnector {
    async fn create_object(&self, object_type: &str, body: serde_json::Value) -> Result<String, InfobloxError> {
        let url = self.build_url(object_type);
        debug!("POST {} with body: {}", url, body);

        let response = self
            .authorized(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        self.read_response("POST", object_type, response).await
    }

    async fn get_object(
        &self,
        object_type: &str,
        reference: Option<&str>,
        query: &ObjectQuery,
    ) -> Result<serde_json::Value, InfobloxError> {
        let path = reference.unwrap_or(object_type);
        let mut url = self.build_url(path);
        let query_string = self.build_query_string(query);
        if !query_string.is_empty() {
            url = format!("{}?{}", url, query_string);
        }
        debug!("GET {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;

        self.read_response("GET", path, response).await
    }

    async fn update_object(&self, reference: &str, body: serde_json::Value) -> Result<String, InfobloxError> {
        let url = self.build_url(reference);
        debug!("PUT {} with body: {}", url, body);

        let response = self
            .authorized(self.client.put(&url))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        self.read_response("PUT", reference, response).await
    }

    async fn delete_object(&self, reference: &str) -> Result<String, InfobloxError> {
        let url = self.build_url(reference);
        debug!("DELETE {}", url);

        let response = self.authorized(self.client.delete(&url)).send().await?;

        self.read_response("DELETE", reference, response).await
    }

    async fn create_multi_object(&self, requests: serde_json::Value) -> Result<serde_json::Value, InfobloxError> {
        let url = self.build_url(MULTI_REQUEST_PATH);
        debug!("POST {} with body: {}", url, requests);

        let response = self
            .authorized(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(&requests)
            .send()
            .await?;

        self.read_response("POST", MULTI_REQUEST_PATH, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ea::Ea;

    fn connector() -> WapiConnector {
        let host = HostConfig::new("gridmaster.example.com", "admin", "secret");
        WapiConnector::new(&host, &TransportConfig::default()).unwrap()
    }

    #[test]
    fn test_build_url() {
        let connector = connector();
        assert_eq!(connector.build_url("network"), "https://gridmaster.example.com:443/wapi/v2.5/network");
        assert_eq!(
            connector.build_url("fixedaddress/ZG5zLmJpbmRfY25h:12.0.10.1/external"),
            "https://gridmaster.example.com:443/wapi/v2.5/fixedaddress/ZG5zLmJpbmRfY25h:12.0.10.1/external"
        );
    }

    #[test]
    fn test_build_query_string() {
        let mut ea = Ea::new();
        ea.insert("Tenant ID", "t 1");
        let query = ObjectQuery {
            filters: vec![
                ("network_view".to_string(), "default".to_string()),
                ("network".to_string(), "10.0.0.0/24".to_string()),
            ],
            ea_search: ea,
            return_fields: vec!["extattrs".to_string(), "network".to_string()],
        };

        assert_eq!(
            connector().build_query_string(&query),
            "network_view=default&network=10.0.0.0%2F24&*Tenant%20ID=t%201&_return_fields=extattrs,network"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", connector());
        assert!(rendered.contains("gridmaster.example.com"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(connector().build_query_string(&ObjectQuery::default()), "");
    }
}
