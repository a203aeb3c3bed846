// Copyright (c) 2025 - Cowboy AI, Inc.
//! Redfish power reconciliation core
//!
//! Drives the computer system behind a Redfish BMC to a requested power state
//! and serializes mutating operations per BMC endpoint.
//!
//! - [`power`]: the decision table and the reset/poll loop
//! - [`locks`]: the per-endpoint mutex registry
//! - [`probe`]: post-reboot reachability check
//! - [`reconcile`]: lock, mutate, reset, release as one call
//!
//! The HTTP client lives behind [`bmc::RedfishService`]; this crate never
//! authenticates to a BMC itself.

pub mod bmc;
pub mod config;
pub mod domain;
pub mod errors;
pub mod locks;
pub mod logging;
pub mod power;
pub mod probe;
pub mod reconcile;
pub mod state_machine;

// Re-export commonly used types
pub use bmc::{resolve_system, BmcError, RedfishService};
pub use config::{PowerTiming, ProbeSettings, ProviderConfig, RedfishServer, ServerCredentials};
pub use domain::{ComputerSystem, Operation, PowerState, ResetType};
pub use errors::{ProviderError, ProviderResult};
pub use locks::{EndpointGuard, EndpointLocks};
pub use power::{PowerOperator, PowerOutcome, PowerPlan};
pub use probe::{wait_for_reachability, Connector, TcpConnector};
pub use reconcile::{ReconcileError, Reconciled, Reconciler};
