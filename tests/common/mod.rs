//! Shared setup for the integration tests.
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ...
//! }
//! ```
//!
//! Heap events are only emitted with the `tracing` feature. `RUST_LOG` filters
//! them (for example `meldable_heaps::fibonacci=trace`); without it only
//! warnings are shown.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static INIT: Once = Once::new();

/// Installs a console subscriber for the test binary. Only the first call has an effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_test_writer()
            .compact()
            .with_filter(filter);

        // Another harness may already own the global subscriber
        let _ = Registry::default().with(layer).try_init();
    });
}
