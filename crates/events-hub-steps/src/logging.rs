//! Logging configuration
//!
//! Step handlers log through `tracing`; this installs the subscriber that
//! prints those events for a test run.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "events_hub_steps=info,warn";

/// Initialize tracing for a test run (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable. Calling this
/// more than once, or after another subscriber was installed, is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
