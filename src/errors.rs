// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for power reconciliation and endpoint serialization

use thiserror::Error;

use crate::bmc::BmcError;
use crate::domain::{PowerState, ResetType};

/// Errors that can occur while driving a BMC
///
/// Every variant that talks to a remote endpoint carries that endpoint so a
/// caller can log the failure without threading extra context around.
/// Non-convergence within the wait budget has no variant: it is
/// reported through [`crate::power::PowerOutcome`], not as an error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The endpoint reports no manageable computer system
    #[error("no computer systems found at {endpoint}")]
    SystemNotFound { endpoint: String },

    /// A fetch against the remote service failed
    #[error("{context} failed at {endpoint}: {source}")]
    RemoteCall {
        endpoint: String,
        context: String,
        #[source]
        source: BmcError,
    },

    /// The reset action itself was rejected or failed in transport
    #[error("reset {action} failed at {endpoint} (last state {last_state}): {source}")]
    ResetFailed {
        endpoint: String,
        action: ResetType,
        last_state: PowerState,
        #[source]
        source: BmcError,
    },

    /// The management interface did not come back within the probe timeout
    #[error("{endpoint} unreachable: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The surrounding operation was cancelled at a suspension point
    #[error("operation against {endpoint} was cancelled")]
    Cancelled { endpoint: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Endpoint the error refers to, when it has one
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ProviderError::SystemNotFound { endpoint }
            | ProviderError::RemoteCall { endpoint, .. }
            | ProviderError::ResetFailed { endpoint, .. }
            | ProviderError::Unreachable { endpoint, .. }
            | ProviderError::Cancelled { endpoint } => Some(endpoint),
            ProviderError::Configuration(_) => None,
        }
    }

    /// Whether the error came from cooperative cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProviderError::Cancelled { .. })
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
