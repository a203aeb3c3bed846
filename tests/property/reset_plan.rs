// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the reset decision table

use proptest::prelude::*;
use redfish_provider::domain::{PowerState, ResetType};
use redfish_provider::power::{plan, PowerPlan};

use super::{any_power_state, any_reset};

fn is_restart(reset: ResetType) -> bool {
    matches!(
        reset,
        ResetType::ForceRestart | ResetType::GracefulRestart | ResetType::PowerCycle | ResetType::Nmi
    )
}

proptest! {
    #[test]
    fn target_is_always_on_or_off(reset in any_reset(), current in any_power_state()) {
        let target = plan(reset, current).target();
        prop_assert!(target == PowerState::On || target == PowerState::Off);
    }

    #[test]
    fn restarts_always_end_powered_on(reset in any_reset(), current in any_power_state()) {
        prop_assume!(is_restart(reset));
        let decided = plan(reset, current);

        prop_assert_eq!(decided.target(), PowerState::On);
        let expected = if current == PowerState::Off { ResetType::On } else { reset };
        prop_assert_eq!(decided.action(), Some(expected));
    }

    #[test]
    fn short_circuit_only_when_already_there(reset in any_reset(), current in any_power_state()) {
        match plan(reset, current) {
            PowerPlan::AlreadySatisfied(state) => {
                prop_assert_eq!(state, current);
                prop_assert!(current == PowerState::On || current == PowerState::Off);
                prop_assert!(!is_restart(reset));
                prop_assert_ne!(reset, ResetType::PushPowerButton);
            }
            PowerPlan::Reset { target, .. } => {
                // A reset is never issued towards the state already reported
                // except by restarts, which pass through the opposite state
                if !is_restart(reset) {
                    prop_assert_ne!(target, current);
                }
            }
        }
    }

    #[test]
    fn only_restarts_substitute_the_action(reset in any_reset(), current in any_power_state()) {
        if let Some(action) = plan(reset, current).action() {
            if action != reset {
                prop_assert!(is_restart(reset));
                prop_assert_eq!(current, PowerState::Off);
                prop_assert_eq!(action, ResetType::On);
            }
        }
    }

    #[test]
    fn push_button_toggles(current in any_power_state()) {
        let expected = if current == PowerState::Off { PowerState::On } else { PowerState::Off };
        prop_assert_eq!(
            plan(ResetType::PushPowerButton, current),
            PowerPlan::Reset { action: ResetType::PushPowerButton, target: expected }
        );
    }
}
