// Copyright (c) 2025 - Cowboy AI, Inc.
//! Power Transition State Machine
//!
//! Tracks one reset operation as the operator observes it. The machine does
//! not simulate hardware: every state change is driven by an observation the
//! operator fed in, either "the BMC accepted a reset aiming for `target`" or
//! "a poll sampled `state`".
//!
//! # States
//!
//! - Idle: no reset issued yet, holding the last observed power state
//! - Transitioning: reset accepted, target not observed yet
//! - Converged: target observed (terminal for polling)
//!
//! # Inputs
//!
//! - ResetAccepted { target }: Idle | Converged → Transitioning
//! - Sampled(state): Idle → Idle, Transitioning → Transitioning | Converged

use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};
use crate::domain::PowerState;

/// Observation fed into the power transition machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSignal {
    /// The BMC accepted a reset action expected to end in `target`
    ResetAccepted { target: PowerState },

    /// A poll observed the system in this state
    Sampled(PowerState),
}

impl fmt::Display for PowerSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerSignal::ResetAccepted { target } => write!(f, "ResetAccepted({})", target),
            PowerSignal::Sampled(state) => write!(f, "Sampled({})", state),
        }
    }
}

/// Where a reset operation stands, as observed through polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerTransition {
    /// No reset issued yet
    Idle(PowerState),

    /// Reset accepted; waiting for the system to report `target`
    Transitioning {
        target: PowerState,
        observed: PowerState,
    },

    /// The system reported the target state
    Converged(PowerState),
}

impl PowerTransition {
    /// Most recent power state observed
    pub fn observed(&self) -> PowerState {
        match self {
            PowerTransition::Idle(state) | PowerTransition::Converged(state) => *state,
            PowerTransition::Transitioning { observed, .. } => *observed,
        }
    }

    /// Whether the target has been observed
    pub fn is_converged(&self) -> bool {
        matches!(self, PowerTransition::Converged(_))
    }
}

impl fmt::Display for PowerTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerTransition::Idle(state) => write!(f, "Idle({})", state),
            PowerTransition::Transitioning { target, observed } => {
                write!(f, "Transitioning({} -> {})", observed, target)
            }
            PowerTransition::Converged(state) => write!(f, "Converged({})", state),
        }
    }
}

/// Output of a power transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionNote {
    /// Warnings worth surfacing in the operator log
    pub warnings: Vec<String>,
}

impl TransitionNote {
    fn ok() -> Self {
        Self::default()
    }

    fn sampled(state: PowerState) -> Self {
        if state == PowerState::Unknown {
            Self {
                warnings: vec!["BMC reported an unrecognised power state".to_string()],
            }
        } else {
            Self::ok()
        }
    }
}

impl StateMachine for PowerTransition {
    type Input = PowerSignal;
    type Output = TransitionNote;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use PowerSignal::*;
        use PowerTransition::*;

        match (*self, *input) {
            (Idle(_), Sampled(state)) => Ok((Idle(state), TransitionNote::sampled(state))),
            (Idle(observed), ResetAccepted { target })
            | (Converged(observed), ResetAccepted { target }) => Ok((
                Transitioning { target, observed },
                TransitionNote::ok(),
            )),
            (Transitioning { target, .. }, Sampled(state)) if state == target => {
                Ok((Converged(state), TransitionNote::ok()))
            }
            (Transitioning { target, .. }, Sampled(state)) => Ok((
                Transitioning {
                    target,
                    observed: state,
                },
                TransitionNote::sampled(state),
            )),
            (from @ Transitioning { .. }, input @ ResetAccepted { .. })
            | (from @ Converged(_), input @ Sampled(_)) => {
                Err(TransitionError::InvalidTransition {
                    from: from.to_string(),
                    input: input.to_string(),
                })
            }
        }
    }
}
