// Copyright (c) 2025 - Cowboy AI, Inc.
//! Computer System handle and declarative operations

use serde::{Deserialize, Serialize};
use std::fmt;

use super::power::PowerState;

/// The parts of a Redfish `ComputerSystem` resource the power operator reads
///
/// Deserializes straight from the Redfish JSON representation; unknown
/// fields are ignored and a missing `PowerState` reads as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerSystem {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,

    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "PowerState", default)]
    pub power_state: PowerState,
}

impl ComputerSystem {
    /// Create a system handle with the given id and power state
    pub fn new(odata_id: impl Into<String>, id: impl Into<String>, power_state: PowerState) -> Self {
        Self {
            odata_id: odata_id.into(),
            id: id.into(),
            name: None,
            power_state,
        }
    }

    /// URI of the `ComputerSystem.Reset` action for this system
    pub fn reset_target(&self) -> String {
        format!(
            "{}/Actions/ComputerSystem.Reset",
            self.odata_id.trim_end_matches('/')
        )
    }
}

/// Operation the declarative engine is executing against a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
    Import,
}

impl Operation {
    /// Whether the operation writes to the BMC and so needs the endpoint lock
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Update | Operation::Delete
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        };
        f.write_str(name)
    }
}
