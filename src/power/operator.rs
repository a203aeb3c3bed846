// Copyright (c) 2025 - Cowboy AI, Inc.
//! Power Operator
//!
//! Drives one computer system through a requested reset and polls until the
//! expected power state shows up or the wait budget runs out.
//!
//! # Sequence
//!
//! ```text
//! resolve system → plan → issue reset → (sleep → refetch → compare)*
//! ```
//!
//! # Failure policy
//!
//! - Lookup failures, before or during polling, fail the call.
//! - A failed reset fails the call with the pre-operation state; polling is
//!   never entered and the reset is never retried.
//! - Running out of wait budget is *not* an error. The outcome carries the
//!   last observed state and [`PowerOutcome::converged`] reports `false`.
//!
//! Every await, remote calls included, is raced against the cancellation
//! token. A reset cancelled in flight may or may not have reached the BMC.
//!
//! The operator knows nothing about endpoint locks. Callers hold the
//! endpoint's guard for the whole call.

use chrono::Utc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use super::plan::{plan, PowerPlan};
use crate::bmc::{resolve_system, RedfishService};
use crate::config::PowerTiming;
use crate::domain::{ComputerSystem, PowerState, ResetType};
use crate::errors::{ProviderError, ProviderResult};
use crate::state_machine::power_transition::{PowerSignal, PowerTransition};
use crate::state_machine::{StateMachineWithHistory, Transition};

/// Recorded step of a power operation
pub type PowerStep = Transition<PowerTransition, PowerSignal>;

/// What a power operation observed
#[derive(Debug, Clone)]
pub struct PowerOutcome {
    /// Power state at return: the target on convergence, otherwise the last sample
    pub state: PowerState,

    /// State the operator waited for; `None` when nothing had to be done
    pub target: Option<PowerState>,

    /// Action actually sent to the BMC
    pub issued: Option<ResetType>,

    /// Number of poll iterations performed
    pub polls: u32,

    /// Every observed transition, in order
    pub history: Vec<PowerStep>,
}

impl PowerOutcome {
    /// Whether the returned state is the one the operator was aiming for
    pub fn converged(&self) -> bool {
        self.target.map_or(true, |target| target == self.state)
    }
}

/// Executes reset actions against the system behind a [`RedfishService`]
pub struct PowerOperator<'a> {
    service: &'a dyn RedfishService,
    cancel: CancellationToken,
}

impl<'a> PowerOperator<'a> {
    /// Create an operator; `cancel` is observed at every suspension point
    pub fn new(service: &'a dyn RedfishService, cancel: CancellationToken) -> Self {
        Self { service, cancel }
    }

    /// Execute `reset` and wait, within `timing`, for the expected state
    pub async fn power_operation(
        &self,
        reset: ResetType,
        timing: PowerTiming,
    ) -> ProviderResult<PowerOutcome> {
        timing.validate()?;
        let endpoint = self.service.endpoint();

        let system = self.fetch_system().await?;
        let current = system.power_state;
        let mut tracker = StateMachineWithHistory::new(PowerTransition::Idle(current));

        let (action, target) = match plan(reset, current) {
            PowerPlan::AlreadySatisfied(state) => {
                trace!(endpoint, %reset, %state, "Server already in requested state, no action required");
                return Ok(PowerOutcome {
                    state,
                    target: None,
                    issued: None,
                    polls: 0,
                    history: tracker.into_history(),
                });
            }
            PowerPlan::Reset { action, target } => (action, target),
        };

        trace!(
            endpoint,
            %action,
            %target,
            uri = %system.reset_target(),
            "Performing system reset"
        );
        let issued = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(self.cancelled()),
            issued = self.service.reset(&system, action) => issued,
        };
        if let Err(source) = issued {
            warn!(endpoint, %action, error = %source, "System reset returned an error");
            return Err(ProviderError::ResetFailed {
                endpoint: endpoint.to_string(),
                action,
                last_state: current,
                source,
            });
        }
        record(&mut tracker, PowerSignal::ResetAccepted { target });

        let max_wait = timing.max_wait();
        let interval = timing.poll_interval();
        let mut elapsed = Duration::ZERO;
        let mut polls = 0u32;
        let mut last = current;

        while elapsed < max_wait {
            self.pause(interval).await?;
            elapsed += interval;
            polls += 1;
            trace!(endpoint, elapsed_secs = elapsed.as_secs(), "Checking power state");

            last = self.fetch_system().await?.power_state;
            record(&mut tracker, PowerSignal::Sampled(last));

            if tracker.current_state().is_converged() {
                debug!(endpoint, %action, state = %last, polls, "System reset successful");
                return Ok(PowerOutcome {
                    state: last,
                    target: Some(target),
                    issued: Some(action),
                    polls,
                    history: tracker.into_history(),
                });
            }
        }

        warn!(
            endpoint,
            %action,
            %target,
            state = %last,
            max_wait_secs = max_wait.as_secs(),
            "System did not reach the target power state within the maximum wait time"
        );
        Ok(PowerOutcome {
            state: last,
            target: Some(target),
            issued: Some(action),
            polls,
            history: tracker.into_history(),
        })
    }

    async fn fetch_system(&self) -> ProviderResult<ComputerSystem> {
        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(self.cancelled()),
            fetched = resolve_system(self.service) => fetched,
        };
        fetched.inspect_err(|e| {
            error!(endpoint = self.service.endpoint(), error = %e, "Failed to identify system");
        })
    }

    async fn pause(&self, duration: Duration) -> ProviderResult<()> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(self.cancelled()),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }

    fn cancelled(&self) -> ProviderError {
        debug!(endpoint = self.service.endpoint(), "Power operation cancelled");
        ProviderError::Cancelled {
            endpoint: self.service.endpoint().to_string(),
        }
    }
}

fn record(tracker: &mut StateMachineWithHistory<PowerTransition>, signal: PowerSignal) {
    match tracker.transition_with_history(signal, Utc::now()) {
        Ok(note) => {
            for warning in note.warnings {
                warn!(%signal, "{}", warning);
            }
        }
        Err(e) => warn!(error = %e, "Power transition not recorded"),
    }
}
