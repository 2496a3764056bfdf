//! Connection configuration.
//!
//! A [`ConnectionProfile`] describes the network endpoints a transport was
//! opened against, in the JSON layout the network's tooling writes:
//!
//! ```json
//! {
//!   "name": "local",
//!   "membershipServicesURL": "grpc://localhost:7054",
//!   "peerURL": "grpc://localhost:7051",
//!   "eventHubURL": "grpc://localhost:7053",
//!   "keyValStore": "/tmp/keyValStore",
//!   "deployWaitTime": 60,
//!   "invokeWaitTime": 30
//! }
//! ```
//!
//! The session layer only reads the event hub URL and the two wait times;
//! the remaining endpoints are carried for the code that builds the
//! transport.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, version::CLIENT_VERSION};

/// Network endpoints and wait hints for one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProfile {
    /// Profile name, used in logs
    #[serde(default)]
    pub name: String,
    /// Membership service (enrollment) endpoint
    #[serde(rename = "membershipServicesURL")]
    pub membership_services_url: String,
    /// Peer endpoint
    #[serde(rename = "peerURL")]
    pub peer_url: String,
    /// Event hub endpoint
    #[serde(rename = "eventHubURL")]
    pub event_hub_url: String,
    /// Directory the transport keeps enrolled identities in
    #[serde(default = "default_key_val_store")]
    pub key_val_store: String,
    /// Seconds to wait for a deploy to commit
    #[serde(default = "default_deploy_wait_time")]
    pub deploy_wait_time: u64,
    /// Seconds to wait for an invoke to commit
    #[serde(default = "default_invoke_wait_time")]
    pub invoke_wait_time: u64,
}

fn default_key_val_store() -> String {
    "/tmp/keyValStore".to_string()
}

fn default_deploy_wait_time() -> u64 {
    60
}

fn default_invoke_wait_time() -> u64 {
    30
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            name: "local".to_string(),
            membership_services_url: "grpc://localhost:7054".to_string(),
            peer_url: "grpc://localhost:7051".to_string(),
            event_hub_url: "grpc://localhost:7053".to_string(),
            key_val_store: default_key_val_store(),
            deploy_wait_time: default_deploy_wait_time(),
            invoke_wait_time: default_invoke_wait_time(),
        }
    }
}

impl ConnectionProfile {
    /// Parse and validate a JSON profile.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a JSON profile file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&json)
    }

    /// Check that every endpoint is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoints = [
            ("membershipServicesURL", &self.membership_services_url),
            ("peerURL", &self.peer_url),
            ("eventHubURL", &self.event_hub_url),
        ];
        for (field, value) in endpoints {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Deploy commit wait.
    pub fn deploy_wait(&self) -> Duration {
        Duration::from_secs(self.deploy_wait_time)
    }

    /// Invoke commit wait.
    pub fn invoke_wait(&self) -> Duration {
        Duration::from_secs(self.invoke_wait_time)
    }
}

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Version compared against the deployed chain-code's ping answer
    pub client_version: String,
    /// Endpoints the transport was opened against
    pub profile: ConnectionProfile,
}

impl ConnectionConfig {
    /// Configuration for `profile` at this client's build version.
    pub fn new(profile: ConnectionProfile) -> Self {
        Self { client_version: CLIENT_VERSION.to_string(), profile }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(ConnectionProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "name": "hlfabric",
        "membershipServicesURL": "grpc://membersrvc:7054",
        "peerURL": "grpc://vp0:7051",
        "eventHubURL": "grpc://vp0:7053",
        "keyValStore": "/var/lib/keyValStore",
        "deployWaitTime": 120
    }"#;

    #[test]
    fn parses_network_field_names() {
        let profile = ConnectionProfile::from_json(PROFILE).unwrap();
        assert_eq!(profile.name, "hlfabric");
        assert_eq!(profile.membership_services_url, "grpc://membersrvc:7054");
        assert_eq!(profile.peer_url, "grpc://vp0:7051");
        assert_eq!(profile.event_hub_url, "grpc://vp0:7053");
        assert_eq!(profile.key_val_store, "/var/lib/keyValStore");
        assert_eq!(profile.deploy_wait(), Duration::from_secs(120));
        assert_eq!(profile.invoke_wait(), Duration::from_secs(30));
    }

    #[test]
    fn missing_endpoint_is_a_parse_error() {
        let err = ConnectionProfile::from_json(r#"{"peerURL":"grpc://vp0:7051"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let json = PROFILE.replace("grpc://vp0:7053", " ");
        let err = ConnectionProfile::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("eventHubURL")));
        assert_eq!(err.to_string(), "connection profile field eventHubURL not specified");
    }

    #[test]
    fn unreadable_file_names_path() {
        let err = ConnectionProfile::from_path("/nonexistent/profile.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/profile.json"));
    }

    #[test]
    fn default_config_uses_build_version() {
        let config = ConnectionConfig::default();
        assert_eq!(config.client_version, CLIENT_VERSION);
        assert!(config.profile.validate().is_ok());
    }
}
