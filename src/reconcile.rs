// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reconcile operations against one BMC
//!
//! Packages the calling discipline every resource follows:
//!
//! 1. take the endpoint lock (mutating operations, or any operation that
//!    reboots the system)
//! 2. run the resource's read-modify-write against the service
//! 3. optionally drive a reset through the [`PowerOperator`]
//! 4. release the lock, on every exit path
//!
//! Each run gets a UUID v7 `operation_id`, attached to every log line it
//! emits through a tracing span.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::bmc::RedfishService;
use crate::config::{PowerTiming, RedfishServer};
use crate::domain::{Operation, ResetType};
use crate::errors::ProviderError;
use crate::locks::EndpointLocks;
use crate::power::{PowerOperator, PowerOutcome};

/// Errors from a reconcile run
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Locking, power control or configuration failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The resource's own read-modify-write failed
    #[error("mutation failed: {0:#}")]
    Mutation(#[source] anyhow::Error),
}

impl ReconcileError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReconcileError::Provider(e) if e.is_cancelled())
    }
}

/// Result of a successful run
#[derive(Debug)]
pub struct Reconciled<T> {
    /// What the mutation returned
    pub value: T,
    /// Power outcome, when a reset was requested
    pub power: Option<PowerOutcome>,
    pub operation_id: Uuid,
}

/// Runs operations under the endpoint lock discipline
#[derive(Debug, Clone)]
pub struct Reconciler {
    locks: Arc<EndpointLocks>,
    timing: PowerTiming,
    cancel: CancellationToken,
}

impl Reconciler {
    pub fn new(locks: Arc<EndpointLocks>, timing: PowerTiming, cancel: CancellationToken) -> Self {
        Self {
            locks,
            timing,
            cancel,
        }
    }

    /// Shared lock registry
    pub fn locks(&self) -> &Arc<EndpointLocks> {
        &self.locks
    }

    /// Run `mutation` against `service`, then apply `reboot` if requested
    ///
    /// The reset runs only when the mutation succeeded. A power operation
    /// that runs out of wait budget still succeeds; inspect
    /// [`PowerOutcome::converged`].
    pub async fn run<'s, T, F, Fut>(
        &self,
        operation: Operation,
        server: &RedfishServer,
        service: &'s dyn RedfishService,
        reboot: Option<ResetType>,
        mutation: F,
    ) -> Result<Reconciled<T>, ReconcileError>
    where
        F: FnOnce(&'s dyn RedfishService) -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let operation_id = Uuid::now_v7();
        let endpoint = server.endpoint_key();
        let span = info_span!("reconcile", %operation_id, %operation, endpoint);

        async move {
            let guard = if operation.is_mutating() || reboot.is_some() {
                Some(self.locks.acquire(endpoint, &self.cancel).await?)
            } else {
                None
            };

            info!(locked = guard.is_some(), "Starting operation");
            let mutated = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    info!("Operation cancelled during mutation");
                    return Err(ReconcileError::Provider(ProviderError::Cancelled {
                        endpoint: endpoint.to_string(),
                    }));
                }
                mutated = mutation(service) => mutated,
            };
            let value = mutated.map_err(|e| {
                error!(error = %e, "Operation failed");
                ReconcileError::Mutation(e)
            })?;

            let power = match reboot {
                Some(reset) => {
                    let operator = PowerOperator::new(service, self.cancel.child_token());
                    let outcome = operator.power_operation(reset, self.timing).await?;
                    info!(
                        state = %outcome.state,
                        converged = outcome.converged(),
                        polls = outcome.polls,
                        "Power operation finished"
                    );
                    Some(outcome)
                }
                None => None,
            };

            drop(guard);
            info!("Operation complete");
            Ok(Reconciled {
                value,
                power,
                operation_id,
            })
        }
        .instrument(span)
        .await
    }
}
