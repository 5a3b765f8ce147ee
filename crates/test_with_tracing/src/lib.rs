// Copyright (C) Microsoft Corporation. All rights reserved.

//! Test attribute that routes `tracing` (and `log`) output into the test
//! harness so failures come with the engine's diagnostics attached.
//!
//! Use it in place of the built-in attribute:
//!
//! ```ignore
//! use test_with_tracing::test;
//!
//! #[test]
//! fn generates_key() { /* ... */ }
//! ```

// Only test code links this crate; `expect` is tolerated here.
#![allow(clippy::expect_used)]

#[cfg(test)]
extern crate self as test_with_tracing;

pub use test_with_tracing_macro::test;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable consulted for the filter directive.
const FILTER_ENV: &str = "RUST_LOG";

#[doc(hidden)]
/// Installs the global subscriber once per test binary.
pub fn init() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::DEBUG.into())
            .with_env_var(FILTER_ENV)
            .from_env_lossy();

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_test_writer()
            .with_thread_ids(true)
            .with_target(true);

        // A second subscriber may already be installed by another harness.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}
