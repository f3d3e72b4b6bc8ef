//! Fixed address `match_client` classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InfobloxError;

/// How a fixed address is matched against incoming DHCP lease requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchClient {
    MacAddress,
    ClientId,
    Reserved,
    CircuitId,
    RemoteId,
}

impl MatchClient {
    pub const ALL: [MatchClient; 5] = [
        MatchClient::MacAddress,
        MatchClient::ClientId,
        MatchClient::Reserved,
        MatchClient::CircuitId,
        MatchClient::RemoteId,
    ];

    /// The literal WAPI accepts
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchClient::MacAddress => "MAC_ADDRESS",
            MatchClient::ClientId => "CLIENT_ID",
            MatchClient::Reserved => "RESERVED",
            MatchClient::CircuitId => "CIRCUIT_ID",
            MatchClient::RemoteId => "REMOTE_ID",
        }
    }
}

impl fmt::Display for MatchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchClient {
    type Err = InfobloxError;

    /// Exact, case-sensitive match against the five WAPI literals
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchClient::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| InfobloxError::InvalidMatchClient(s.to_string()))
    }
}

/// Returns true only for `MAC_ADDRESS`, `CLIENT_ID`, `RESERVED`,
/// `CIRCUIT_ID` and `REMOTE_ID`.
pub fn is_valid_match_client(value: &str) -> bool {
    value.parse::<MatchClient>().is_ok()
}
