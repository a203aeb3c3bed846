// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote Redfish service seam
//!
//! The power operator never speaks HTTP itself. It talks to a
//! [`RedfishService`], an already connected and authenticated client for one
//! BMC endpoint. Production code plugs in its Redfish client; tests plug in a
//! scripted double.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::domain::{ComputerSystem, ResetType};
use crate::errors::{ProviderError, ProviderResult};

/// Error type for calls against a BMC
#[derive(Debug, Error)]
pub enum BmcError {
    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Command failed
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// Operation timed out
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// Unsupported operation
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// A connected Redfish service for one BMC endpoint
#[async_trait]
pub trait RedfishService: Send + Sync {
    /// Endpoint this service is connected to
    fn endpoint(&self) -> &str;

    /// Fetch the computer systems collection, freshly, from the BMC
    async fn systems(&self) -> Result<Vec<ComputerSystem>, BmcError>;

    /// Issue `ComputerSystem.Reset` with the given action against a system
    async fn reset(&self, system: &ComputerSystem, action: ResetType) -> Result<(), BmcError>;
}

/// Resolve the system the provider acts on: the first one the BMC lists
pub async fn resolve_system(service: &dyn RedfishService) -> ProviderResult<ComputerSystem> {
    let systems = service
        .systems()
        .await
        .map_err(|source| ProviderError::RemoteCall {
            endpoint: service.endpoint().to_string(),
            context: "fetch computer systems".to_string(),
            source,
        })?;

    let system = systems
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::SystemNotFound {
            endpoint: service.endpoint().to_string(),
        })?;

    debug!(
        endpoint = service.endpoint(),
        system = %system.id,
        power_state = %system.power_state,
        "Resolved computer system"
    );
    Ok(system)
}
