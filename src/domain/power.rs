// Copyright (c) 2025 - Cowboy AI, Inc.
//! Power State and Reset Action Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Power value parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PowerValueError {
    #[error("Unknown reset type: {0}")]
    UnknownResetType(String),
}

/// Power state reported by a BMC for a computer system
///
/// Mirrors the Redfish `PowerState` enumeration. Anything a BMC reports that
/// is not one of the Redfish values (or a missing field) becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerState {
    On,
    Off,
    /// Transitioning to `On`
    PoweringOn,
    /// Transitioning to `Off`
    PoweringOff,
    Paused,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PowerState {
    /// Redfish name of this state
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "On",
            PowerState::Off => "Off",
            PowerState::PoweringOn => "PoweringOn",
            PowerState::PoweringOff => "PoweringOff",
            PowerState::Paused => "Paused",
            PowerState::Unknown => "Unknown",
        }
    }

    /// Whether the system is transitioning between on and off
    pub fn is_transitioning(&self) -> bool {
        matches!(self, PowerState::PoweringOn | PowerState::PoweringOff)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "On" => PowerState::On,
            "Off" => PowerState::Off,
            "PoweringOn" => PowerState::PoweringOn,
            "PoweringOff" => PowerState::PoweringOff,
            "Paused" => PowerState::Paused,
            _ => PowerState::Unknown,
        })
    }
}

/// Reset action sent to a BMC through `ComputerSystem.Reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetType {
    On,
    ForceOn,
    ForceOff,
    GracefulShutdown,
    GracefulRestart,
    ForceRestart,
    Nmi,
    PushPowerButton,
    PowerCycle,
}

impl ResetType {
    /// Every reset action, in Redfish schema order
    pub const ALL: [ResetType; 9] = [
        ResetType::On,
        ResetType::ForceOn,
        ResetType::ForceOff,
        ResetType::GracefulShutdown,
        ResetType::GracefulRestart,
        ResetType::ForceRestart,
        ResetType::Nmi,
        ResetType::PushPowerButton,
        ResetType::PowerCycle,
    ];

    /// Redfish name of this action
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetType::On => "On",
            ResetType::ForceOn => "ForceOn",
            ResetType::ForceOff => "ForceOff",
            ResetType::GracefulShutdown => "GracefulShutdown",
            ResetType::GracefulRestart => "GracefulRestart",
            ResetType::ForceRestart => "ForceRestart",
            ResetType::Nmi => "Nmi",
            ResetType::PushPowerButton => "PushPowerButton",
            ResetType::PowerCycle => "PowerCycle",
        }
    }
}

impl fmt::Display for ResetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetType {
    type Err = PowerValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResetType::ALL
            .into_iter()
            .find(|reset| reset.as_str() == s)
            .ok_or_else(|| PowerValueError::UnknownResetType(s.to_string()))
    }
}
