// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic, reusable state machine types. Transitions are pure functions of
//! `(State, Input)`; anything with side effects (issuing a reset, sleeping,
//! fetching) lives in the driver that feeds inputs in.
//!
//! These are Mealy machines: the output depends on both the current state and
//! the input.
//!
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! The power operator uses [`power_transition::PowerTransition`] wrapped in a
//! [`StateMachineWithHistory`] so that every observed step of a reset is
//! recorded with its timestamp.

pub mod power_transition;

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The input is not accepted in the current state
    #[error("Invalid transition from {from} on {input}")]
    InvalidTransition { from: String, input: String },
}

/// Trait for finite state machines
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}

/// Transition metadata
///
/// Records information about a state transition for auditing.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, I> {
    /// State before transition
    pub from: S,

    /// State after transition
    pub to: S,

    /// Input that triggered transition
    pub input: I,

    /// Timestamp of transition
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<S, I> Transition<S, I> {
    /// Create a new transition record
    pub fn new(from: S, to: S, input: I, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            from,
            to,
            input,
            timestamp,
        }
    }
}

/// State machine with history
///
/// Wraps a state machine and tracks transition history.
#[derive(Debug, Clone)]
pub struct StateMachineWithHistory<FSM: StateMachine> {
    current: FSM,
    history: Vec<Transition<FSM, FSM::Input>>,
}

impl<FSM: StateMachine> StateMachineWithHistory<FSM> {
    /// Create a new state machine with history tracking
    pub fn new(initial: FSM) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Transition with history recording
    ///
    /// A rejected input leaves both the state and the history untouched.
    pub fn transition_with_history(
        &mut self,
        input: FSM::Input,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> TransitionResult<FSM::Output> {
        let (to, output) = self.current.transition(&input)?;
        let from = std::mem::replace(&mut self.current, to.clone());
        self.history.push(Transition::new(from, to, input, timestamp));
        Ok(output)
    }

    /// Get transition history
    pub fn history(&self) -> &[Transition<FSM, FSM::Input>] {
        &self.history
    }

    /// Get current state
    pub fn current_state(&self) -> &FSM {
        &self.current
    }

    /// Consume the wrapper, keeping only the recorded history
    pub fn into_history(self) -> Vec<Transition<FSM, FSM::Input>> {
        self.history
    }
}
