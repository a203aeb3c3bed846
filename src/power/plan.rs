// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reset decision table
//!
//! | requested action                                 | current = On                 | current = Off                    |
//! |--------------------------------------------------|------------------------------|----------------------------------|
//! | ForceOff, GracefulShutdown                       | issue it, target Off         | satisfied, Off                   |
//! | On, ForceOn                                      | satisfied, On                | issue it, target On              |
//! | ForceRestart, GracefulRestart, PowerCycle, Nmi   | issue it, target On          | issue `On` instead, target On    |
//! | PushPowerButton                                  | issue it, target Off         | issue it, target On              |
//!
//! Only an exact `Off` report selects the right-hand column, and only an
//! exact `On` report satisfies an On/ForceOn request. Transitional, paused
//! and unknown reports take the left-hand column of the off and restart rows.

use crate::domain::{PowerState, ResetType};

/// What the operator has to do for a requested reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerPlan {
    /// The system is already where the request would leave it; issue nothing
    AlreadySatisfied(PowerState),

    /// Issue `action` and poll until the system reports `target`
    Reset {
        action: ResetType,
        target: PowerState,
    },
}

impl PowerPlan {
    /// Action to issue, if any
    pub fn action(&self) -> Option<ResetType> {
        match self {
            PowerPlan::AlreadySatisfied(_) => None,
            PowerPlan::Reset { action, .. } => Some(*action),
        }
    }

    /// State the operator expects to observe when done
    pub fn target(&self) -> PowerState {
        match self {
            PowerPlan::AlreadySatisfied(state) => *state,
            PowerPlan::Reset { target, .. } => *target,
        }
    }
}

/// Decide what to issue for `requested` given the `current` power state
pub fn plan(requested: ResetType, current: PowerState) -> PowerPlan {
    use ResetType::*;

    let is_off = current == PowerState::Off;
    match requested {
        ForceOff | GracefulShutdown if is_off => PowerPlan::AlreadySatisfied(PowerState::Off),
        ForceOff | GracefulShutdown => PowerPlan::Reset {
            action: requested,
            target: PowerState::Off,
        },

        On | ForceOn if current == PowerState::On => PowerPlan::AlreadySatisfied(PowerState::On),
        On | ForceOn => PowerPlan::Reset {
            action: requested,
            target: PowerState::On,
        },

        // Restarting a powered-off machine means powering it on
        ForceRestart | GracefulRestart | PowerCycle | Nmi if is_off => PowerPlan::Reset {
            action: On,
            target: PowerState::On,
        },
        ForceRestart | GracefulRestart | PowerCycle | Nmi => PowerPlan::Reset {
            action: requested,
            target: PowerState::On,
        },

        PushPowerButton => PowerPlan::Reset {
            action: PushPowerButton,
            target: if is_off {
                PowerState::On
            } else {
                PowerState::Off
            },
        },
    }
}
