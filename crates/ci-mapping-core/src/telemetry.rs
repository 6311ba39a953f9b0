//! Subscriber setup for the `ci-mapping` binary.
//!
//! Log lines go to stderr so stdout carries only command output.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crate targets that log at the requested level; everything else is held
/// to `warn`.
const MAPPING_TARGETS: [&str; 2] = ["ci_mapping_core", "ci_mapping"];

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    let mut directive = String::from("warn");
    for target in MAPPING_TARGETS {
        directive.push_str(&format!(",{}={}", target, level));
    }
    directive
}

/// Install the global subscriber. Later calls are no-ops.
///
/// With `json`, every line carries the enclosing `ci_mapping.invocation`
/// span, so its `journey_id` travels with events that do not record it
/// themselves.
pub fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
