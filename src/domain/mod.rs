// Copyright (c) 2025 - Cowboy AI, Inc.
//! BMC Domain Models
//!
//! Value objects shared by the power operator, the endpoint lock registry and
//! their callers.
//!
//! - [`PowerState`] - Redfish power state of a computer system
//! - [`ResetType`] - Redfish `ComputerSystem.Reset` action
//! - [`ComputerSystem`] - the remote system handle the operator observes
//! - [`Operation`] - declarative-engine operation being reconciled

pub mod power;
pub mod system;

pub use power::{PowerState, PowerValueError, ResetType};
pub use system::{ComputerSystem, Operation};
