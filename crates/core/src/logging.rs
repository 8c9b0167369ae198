//! Logging and observability
//!
//! Structured logging via tracing-subscriber, with text or JSON formatting
//! selected at runtime. All logging output goes to stderr; stdout stays free
//! for the server process. The orchestration harness greps this stream for
//! the numeric-name rejection warning and the dump-completion marker, so the
//! plain message text must survive whichever format is active.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system with an optional format specification.
///
/// Supported formats: `"json"` for structured JSON, anything else (including
/// `None`) for human-readable text. Safe to call multiple times; subsequent
/// calls are no-ops.
///
/// Filtering comes from `NEO4J_ENTRYPOINT_LOG`, falling back to `RUST_LOG`,
/// defaulting to `info`.
pub fn init(format: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter();
        let env_format = std::env::var("NEO4J_ENTRYPOINT_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Create an EnvFilter from the environment
fn create_env_filter() -> EnvFilter {
    if let Ok(spec) = std::env::var("NEO4J_ENTRYPOINT_LOG") {
        EnvFilter::try_new(&spec).unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Check if logging has been initialized; useful in tests
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
