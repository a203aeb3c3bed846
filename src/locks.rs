// Copyright (c) 2025 - Cowboy AI, Inc.
//! Endpoint mutex registry
//!
//! Serializes mutating operations that target the same BMC. The registry
//! maps an endpoint key to a single exclusive lock, created lazily on first
//! request. Operations against different endpoints never block each other.
//!
//! Get-or-create is atomic: any number of first-time requests for one key
//! observe the same lock. Entries are never evicted, so the table grows with
//! the number of distinct endpoints seen during the process lifetime.
//!
//! A held lock is represented by an [`EndpointGuard`]. Dropping the guard
//! releases the lock, so early returns and panics cannot leak it, and a
//! second release is not expressible.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::errors::{ProviderError, ProviderResult};

/// Process-wide table of per-endpoint locks
#[derive(Debug, Default)]
pub struct EndpointLocks {
    table: DashMap<String, Arc<Mutex<()>>>,
}

impl EndpointLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock for `key`, creating it if this is the first request
    ///
    /// Concurrent first-time callers for the same key all receive the same
    /// lock.
    pub fn handle_for(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(existing) = self.table.get(key) {
            return Arc::clone(existing.value());
        }

        let entry = self.table.entry(key.to_string()).or_insert_with(|| {
            debug!(endpoint = key, "Creating endpoint lock");
            Arc::new(Mutex::new(()))
        });
        Arc::clone(entry.value())
    }

    /// Wait for exclusive access to `key`
    ///
    /// Fails with [`ProviderError::Cancelled`] if `cancel` fires first; in
    /// that case the lock was never taken.
    pub async fn acquire(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<EndpointGuard> {
        let lock = self.handle_for(key);
        trace!(endpoint = key, "Waiting for endpoint lock");

        let guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(endpoint = key, "Cancelled while waiting for endpoint lock");
                return Err(ProviderError::Cancelled { endpoint: key.to_string() });
            }
            guard = lock.lock_owned() => guard,
        };

        trace!(endpoint = key, "Endpoint lock acquired");
        Ok(EndpointGuard {
            key: key.to_string(),
            _guard: guard,
        })
    }

    /// Number of distinct endpoints seen so far
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Exclusive hold on one endpoint; released on drop
#[derive(Debug)]
pub struct EndpointGuard {
    key: String,
    _guard: OwnedMutexGuard<()>,
}

impl EndpointGuard {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Release the lock now instead of at end of scope
    pub fn release(self) {
        trace!(endpoint = %self.key, "Releasing endpoint lock");
    }
}
