//! Infoblox client errors

use thiserror::Error;

/// Errors that can occur when talking to the Infoblox WAPI
#[derive(Debug, Error)]
pub enum InfobloxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WAPI returned an error
    #[error("Infoblox API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, locked account, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Object reference does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown match_client classification for a fixed address
    #[error("wrong value for match_client passed: {0}")]
    InvalidMatchClient(String),

    /// Missing or malformed connection settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
