//! HMRC contra-indicator mapping
//!
//! Maps upstream HMRC error codes to canonical contra-indicators:
//! - `mapping`: parse `"errA,errB:CI"` configuration strings
//! - `validator`: reject malformed or inconsistent tables before resolving
//! - `resolver`: match error tokens to mapping entries and attach reasons
//! - `dedup`: drop repeated `(ci, reason)` pairs, keeping first-seen order
//!
//! [`CiMappingHandler`] runs the whole pipeline for one event.

pub mod config;
pub mod dedup;
pub mod error;
pub mod event;
pub mod handler;
pub mod indicator;
pub mod mapping;
pub mod obs;
pub mod resolver;
pub mod sink;
pub mod telemetry;
pub mod validator;

pub use config::CiMappingConfig;
pub use dedup::deduplicate;
pub use error::{ConfigurationError, Result};
pub use event::CiMappingEvent;
pub use handler::{CiMappingHandler, HANDLER_SOURCE};
pub use indicator::{ContraIndicator, ReasonEntry};
pub use mapping::{flatten_error_codes, parse_mappings, MappingEntry};
pub use obs::{
    emit_configuration_rejected, emit_hmrc_errors_absent, emit_resolution_finished,
    emit_resolution_started, InvocationSpan,
};
pub use resolver::resolve;
pub use sink::{LogLine, LogSink, RecordingLogSink, TracingLogSink};
pub use telemetry::init_tracing;
pub use validator::{validate, ValidatedMappings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
