// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider and per-server configuration
//!
//! Connection settings come in two layers, like the declarative engine
//! presents them: provider-level defaults and a per-resource
//! `redfish_server` block. Resource-level values win when set.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::errors::{ProviderError, ProviderResult};

/// Provider-level connection defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Default BMC user
    #[serde(default)]
    pub username: String,

    /// Default BMC password
    #[serde(default)]
    pub password: String,

    /// Skip TLS verification unless a server overrides it
    #[serde(default)]
    pub ssl_insecure: bool,
}

impl ProviderConfig {
    /// Load provider defaults from `REDFISH_USER`, `REDFISH_PASSWORD` and
    /// `REDFISH_SSL_INSECURE`
    pub fn from_env() -> ProviderResult<Self> {
        let ssl_insecure = match std::env::var("REDFISH_SSL_INSECURE") {
            Ok(value) => value.parse::<bool>().map_err(|_| {
                ProviderError::Configuration(format!(
                    "REDFISH_SSL_INSECURE must be true or false, got {:?}",
                    value
                ))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            username: std::env::var("REDFISH_USER").unwrap_or_default(),
            password: std::env::var("REDFISH_PASSWORD").unwrap_or_default(),
            ssl_insecure,
        })
    }
}

/// A `redfish_server` block: one BMC and, optionally, its own credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedfishServer {
    /// BMC address, e.g. `https://10.0.0.5`
    pub endpoint: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub ssl_insecure: Option<bool>,
}

/// Credentials resolved for a single BMC
#[derive(Clone, PartialEq, Eq)]
pub struct ServerCredentials {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub ssl_insecure: bool,
}

impl std::fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("ssl_insecure", &self.ssl_insecure)
            .finish()
    }
}

impl RedfishServer {
    /// Create a server block with no credential overrides
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user: String::new(),
            password: String::new(),
            ssl_insecure: None,
        }
    }

    /// Key used to serialize mutating operations against this BMC
    pub fn endpoint_key(&self) -> &str {
        &self.endpoint
    }

    /// Merge this block with provider defaults
    ///
    /// Non-empty resource-level user and password win over the provider
    /// values. Both must be non-empty after merging.
    pub fn resolve_credentials(&self, provider: &ProviderConfig) -> ProviderResult<ServerCredentials> {
        let username = if !self.user.is_empty() {
            debug!(endpoint = %self.endpoint, "Using redfish user from resource");
            self.user.clone()
        } else {
            debug!(endpoint = %self.endpoint, "Using redfish user from provider");
            provider.username.clone()
        };

        let password = if !self.password.is_empty() {
            self.password.clone()
        } else {
            provider.password.clone()
        };

        if username.is_empty() || password.is_empty() {
            return Err(ProviderError::Configuration(format!(
                "redfish username or password not set for {}; provide them at provider or resource level",
                self.endpoint
            )));
        }

        Ok(ServerCredentials {
            endpoint: self.endpoint.clone(),
            username,
            password,
            ssl_insecure: self.ssl_insecure.unwrap_or(provider.ssl_insecure),
        })
    }
}

fn default_max_wait_secs() -> u64 {
    120
}

fn default_poll_interval_secs() -> u64 {
    10
}

/// Wait budget for the power operator's poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerTiming {
    /// Upper bound on polling, in seconds
    #[serde(rename = "reset_timeout", default = "default_max_wait_secs")]
    max_wait_secs: u64,

    /// Spacing between power state checks, in seconds
    #[serde(
        rename = "system_reset_check_interval",
        default = "default_poll_interval_secs"
    )]
    poll_interval_secs: u64,
}

impl PowerTiming {
    /// Create a timing from whole seconds; the poll interval must be non-zero
    pub fn new(max_wait: Duration, poll_interval: Duration) -> ProviderResult<Self> {
        if max_wait.subsec_nanos() != 0 || poll_interval.subsec_nanos() != 0 {
            return Err(ProviderError::Configuration(format!(
                "power timing must be whole seconds, got max wait {max_wait:?} and poll interval {poll_interval:?}"
            )));
        }
        let timing = Self {
            max_wait_secs: max_wait.as_secs(),
            poll_interval_secs: poll_interval.as_secs(),
        };
        timing.validate()?;
        Ok(timing)
    }

    /// Reject a zero poll interval; deserialized values are not checked until here
    pub fn validate(&self) -> ProviderResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(ProviderError::Configuration(
                "power poll interval must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for PowerTiming {
    fn default() -> Self {
        Self {
            max_wait_secs: default_max_wait_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Timing for the post-reboot reachability probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Initial wait before the first attempt, while the BMC starts rebooting
    pub grace_period: Duration,
    /// Spacing between attempts
    pub interval: Duration,
    /// Overall budget for attempts, measured after the grace period
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_secs(30),
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(600),
        }
    }
}
