// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod poll_budget;
mod reset_plan;

use proptest::prelude::*;
use redfish_provider::domain::{PowerState, ResetType};

pub fn any_reset() -> impl Strategy<Value = ResetType> {
    proptest::sample::select(ResetType::ALL.to_vec())
}

pub fn any_power_state() -> impl Strategy<Value = PowerState> {
    prop_oneof![
        Just(PowerState::On),
        Just(PowerState::Off),
        Just(PowerState::PoweringOn),
        Just(PowerState::PoweringOff),
        Just(PowerState::Paused),
        Just(PowerState::Unknown),
    ]
}
