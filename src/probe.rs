// Copyright (c) 2025 - Cowboy AI, Inc.
//! Post-reboot reachability probe
//!
//! After a disruptive action against the management controller itself, its
//! network interface drops for a while. [`wait_for_reachability`] waits out a
//! grace period and then dials the endpoint until it accepts a connection or
//! the timeout expires.
//!
//! The probe is independent of the power operator and takes no endpoint
//! lock.

use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use url::Url;

use crate::config::ProbeSettings;
use crate::errors::{ProviderError, ProviderResult};

/// Opens a raw connection to `host:port`
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, address: &str) -> io::Result<()>;
}

/// TCP dialer with a per-attempt timeout
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    pub attempt_timeout: Duration,
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, address: &str) -> io::Result<()> {
        match tokio::time::timeout(self.attempt_timeout, TcpStream::connect(address)).await {
            Ok(stream) => stream.map(drop),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connect to {address} timed out"),
            )),
        }
    }
}

/// `host:port` to dial for an endpoint URL
///
/// Uses the explicit port when present, else the scheme's well-known port.
pub fn socket_address(endpoint: &str) -> ProviderResult<String> {
    let url = Url::parse(endpoint).map_err(|e| {
        ProviderError::Configuration(format!("invalid endpoint {endpoint:?}: {e}"))
    })?;

    let host = url.host_str().ok_or_else(|| {
        ProviderError::Configuration(format!("endpoint {endpoint:?} has no host"))
    })?;
    let port = url.port_or_known_default().ok_or_else(|| {
        ProviderError::Configuration(format!(
            "endpoint {endpoint:?} has no port and scheme {} has no default",
            url.scheme()
        ))
    })?;

    Ok(format!("{host}:{port}"))
}

/// Wait until `endpoint` accepts connections again
pub async fn wait_for_reachability(
    endpoint: &str,
    settings: &ProbeSettings,
    connector: &dyn Connector,
    cancel: &CancellationToken,
) -> ProviderResult<()> {
    let address = socket_address(endpoint)?;

    debug!(endpoint, grace_secs = settings.grace_period.as_secs(), "Waiting for BMC reboot to begin");
    pause(endpoint, settings.grace_period, cancel).await?;

    let start = Instant::now();
    let mut last_error = None;
    while start.elapsed() < settings.timeout {
        trace!(endpoint, %address, "Checking server status");
        pause(endpoint, settings.interval, cancel).await?;

        match connector.connect(&address).await {
            Ok(()) => {
                debug!(endpoint, elapsed_secs = start.elapsed().as_secs(), "Server reachable");
                return Ok(());
            }
            Err(e) => {
                trace!(endpoint, error = %e, "Site unreachable");
                last_error = Some(e);
            }
        }
    }

    Err(ProviderError::Unreachable {
        endpoint: endpoint.to_string(),
        source: last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::TimedOut, "no connection attempt before timeout")
        }),
    })
}

async fn pause(endpoint: &str, duration: Duration, cancel: &CancellationToken) -> ProviderResult<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProviderError::Cancelled { endpoint: endpoint.to_string() }),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
