// Copyright (c) 2025 - Cowboy AI, Inc.
//! Power-state reconciliation
//!
//! [`plan`] turns a requested reset and the observed power state into the
//! action to issue and the state to wait for. [`PowerOperator`] carries the
//! plan out against a live BMC.
//!
//! # Example
//!
//! ```rust,ignore
//! use redfish_provider::power::PowerOperator;
//!
//! let operator = PowerOperator::new(&service, cancel.child_token());
//! let outcome = operator
//!     .power_operation(ResetType::ForceRestart, PowerTiming::default())
//!     .await?;
//! if !outcome.converged() {
//!     warn!(state = %outcome.state, "reset not confirmed");
//! }
//! ```

pub mod operator;
pub mod plan;

pub use operator::{PowerOperator, PowerOutcome, PowerStep};
pub use plan::{plan, PowerPlan};
