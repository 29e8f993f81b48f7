//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use serde::Deserialize;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Sets up the global tracing subscriber for the selected profile. Only the
/// first call has any effect. A subscriber the host process installed
/// earlier is left in place.
///
/// Returns `true` if this call installed the subscriber.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `rowmap=debug` unless `RUST_LOG` is set
/// - **Production**: JSON structured logs, `rowmap=info` unless `RUST_LOG` is set
/// - **Test**: Bare registry; use `init_test_capture()` to record events
pub fn init(profile: Profile) -> bool {
    let mut installed = false;
    INIT_ONCE.call_once(|| {
        installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("rowmap=debug")),
                )
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("rowmap=info")),
                )
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
    });
    installed
}
