// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for redfish-provider
//!
//! Scripted doubles for the BMC and for the network dialer. Everything is
//! deterministic: a [`MockService`] reports the power states it was told to,
//! in order, and a [`ScriptedConnector`] fails or succeeds on cue.
//!
//! # Fetch numbering
//!
//! Fetch 1 is the operator's initial lookup and reports the initial state.
//! Every later fetch pops the next scripted state; once the script runs out
//! the last state repeats.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use redfish_provider::bmc::{BmcError, RedfishService};
use redfish_provider::config::PowerTiming;
use redfish_provider::domain::{ComputerSystem, PowerState, ResetType};
use redfish_provider::probe::Connector;

pub const ENDPOINT: &str = "https://10.0.0.5";
pub const SYSTEM_ID: &str = "System.Embedded.1";

/// 10 s budget polled every 2 s
pub fn short_timing() -> PowerTiming {
    PowerTiming::new(Duration::from_secs(10), Duration::from_secs(2)).expect("valid timing")
}

/// Scripted Redfish service for one BMC
pub struct MockService {
    endpoint: String,
    current: Mutex<PowerState>,
    script: Mutex<VecDeque<PowerState>>,
    fetches: AtomicUsize,
    issued: Mutex<Vec<ResetType>>,
    fail_reset: bool,
    fail_fetch_at: Option<usize>,
    hang_fetch_after: Option<usize>,
    hang_reset: bool,
    no_systems: bool,
}

impl MockService {
    pub fn new(initial: PowerState) -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
            current: Mutex::new(initial),
            script: Mutex::new(VecDeque::new()),
            fetches: AtomicUsize::new(0),
            issued: Mutex::new(Vec::new()),
            fail_reset: false,
            fail_fetch_at: None,
            hang_fetch_after: None,
            hang_reset: false,
            no_systems: false,
        }
    }

    /// States reported by the polls following the initial lookup
    pub fn with_polls(self, states: impl IntoIterator<Item = PowerState>) -> Self {
        *self.script.lock().unwrap() = states.into_iter().collect();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Reject every reset with an HTTP 500
    pub fn failing_reset(mut self) -> Self {
        self.fail_reset = true;
        self
    }

    /// Fail the `n`th fetch (1-based)
    pub fn failing_fetch_at(mut self, n: usize) -> Self {
        self.fail_fetch_at = Some(n);
        self
    }

    /// Never answer any fetch after the `n`th
    pub fn hanging_fetch_after(mut self, n: usize) -> Self {
        self.hang_fetch_after = Some(n);
        self
    }

    /// Record the reset, then never answer it
    pub fn hanging_reset(mut self) -> Self {
        self.hang_reset = true;
        self
    }

    /// Report an empty systems collection
    pub fn without_systems(mut self) -> Self {
        self.no_systems = true;
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.issued.lock().unwrap().len()
    }

    pub fn issued(&self) -> Vec<ResetType> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedfishService for MockService {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn systems(&self) -> Result<Vec<ComputerSystem>, BmcError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        if self.hang_fetch_after.is_some_and(|after| n > after) {
            std::future::pending::<()>().await;
        }
        if self.fail_fetch_at == Some(n) {
            return Err(BmcError::ConnectionFailed("connection reset by peer".to_string()));
        }
        if self.no_systems {
            return Ok(Vec::new());
        }

        let mut current = self.current.lock().unwrap();
        if n > 1 {
            if let Some(next) = self.script.lock().unwrap().pop_front() {
                *current = next;
            }
        }

        Ok(vec![ComputerSystem::new(
            format!("/redfish/v1/Systems/{SYSTEM_ID}"),
            SYSTEM_ID,
            *current,
        )])
    }

    async fn reset(&self, system: &ComputerSystem, action: ResetType) -> Result<(), BmcError> {
        assert_eq!(system.id, SYSTEM_ID);
        self.issued.lock().unwrap().push(action);
        if self.hang_reset {
            std::future::pending::<()>().await;
        }
        if self.fail_reset {
            return Err(BmcError::CommandFailed("HTTP 500 Internal Server Error".to_string()));
        }
        Ok(())
    }
}

/// Dialer that refuses a fixed number of attempts, then connects
pub struct ScriptedConnector {
    refusals: usize,
    attempts: AtomicUsize,
    addresses: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    pub fn refusing(refusals: usize) -> Self {
        Self {
            refusals,
            attempts: AtomicUsize::new(0),
            addresses: Mutex::new(Vec::new()),
        }
    }

    pub fn never() -> Self {
        Self::refusing(usize::MAX)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, address: &str) -> io::Result<()> {
        self.addresses.lock().unwrap().push(address.to_string());
        let n = self.attempts.fetch_add(1, Ordering::SeqCst);
        if n < self.refusals {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"));
        }
        Ok(())
    }
}
