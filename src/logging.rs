// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tracing subscriber setup for processes embedding the provider

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `level`
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place and return `false`.
pub fn init_tracing(level: Level) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
