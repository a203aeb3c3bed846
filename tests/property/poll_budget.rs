// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the poll loop's wait budget
//!
//! Each case runs on its own paused-clock runtime, so budgets of minutes
//! cost no wall-clock time.

use proptest::prelude::*;
use std::iter;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use redfish_provider::config::PowerTiming;
use redfish_provider::domain::{PowerState, ResetType};
use redfish_provider::power::{PowerOperator, PowerOutcome};

use crate::fixtures::MockService;

fn run_force_off(service: &MockService, max_wait: u64, interval: u64) -> PowerOutcome {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    let timing =
        PowerTiming::new(Duration::from_secs(max_wait), Duration::from_secs(interval)).unwrap();
    let operator = PowerOperator::new(service, CancellationToken::new());

    runtime
        .block_on(operator.power_operation(ResetType::ForceOff, timing))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn budget_bounds_the_number_of_polls(max_wait in 0u64..120, interval in 1u64..15) {
        let service = MockService::new(PowerState::On).with_polls([PowerState::PoweringOff]);
        let outcome = run_force_off(&service, max_wait, interval);

        prop_assert_eq!(outcome.polls as u64, max_wait.div_ceil(interval));
        prop_assert!(!outcome.converged());
        prop_assert_eq!(service.resets(), 1);
    }

    #[test]
    fn polling_stops_at_first_match(max_wait in 1u64..120, interval in 1u64..15, settle in 1usize..20) {
        let script = iter::repeat(PowerState::PoweringOff)
            .take(settle - 1)
            .chain(iter::once(PowerState::Off));
        let service = MockService::new(PowerState::On).with_polls(script);
        let outcome = run_force_off(&service, max_wait, interval);

        let budget = max_wait.div_ceil(interval) as usize;
        if settle <= budget {
            prop_assert!(outcome.converged());
            prop_assert_eq!(outcome.polls as usize, settle);
            prop_assert_eq!(outcome.state, PowerState::Off);
        } else {
            prop_assert!(!outcome.converged());
            prop_assert_eq!(outcome.polls as usize, budget);
        }
    }
}
